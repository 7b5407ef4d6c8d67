//! Zero-crossing extraction: initial tokens from Laplacian sign changes.
//!
//! Every 2×2 cell of the Laplacian field is classified by the signs of its
//! corners (see [`cell`]). Cells whose signs change along exactly one chord
//! yield one token; uniform cells, saddles (codes 6 and 9) and cells with an
//! exactly-zero corner yield none. The gradient at the chord midpoint is
//! bilinearly interpolated and its magnitude becomes the token contrast.
//!
//! Rows are classified independently (in parallel with the `parallel`
//! feature) and concatenated in row-major order, so output order and token
//! ids do not depend on scheduling.
//!
//! Complexity: O(W·H).

mod cell;
mod options;

pub use options::CrossingMethod;

use crate::error::Result;
use crate::fields::GeometryFields;
use crate::image::{ImageF64, ImageView};
use crate::sketch::{Token, TokenId, TokenStore};
use cell::{crossing_at, Corners, Crossing};
use log::debug;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Extract one token per crossing cell into a store sized to the fields.
pub fn extract_zero_crossings(
    fields: &GeometryFields,
    method: CrossingMethod,
) -> Result<TokenStore> {
    let start = Instant::now();
    fields.validate()?;

    let (w, h) = fields.lapl.dims();
    let cell_rows = h.saturating_sub(1);
    let rows: Vec<Vec<Crossing>> = {
        #[cfg(feature = "parallel")]
        {
            (0..cell_rows)
                .into_par_iter()
                .map(|i| crossings_in_row(fields, i, method))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..cell_rows)
                .map(|i| crossings_in_row(fields, i, method))
                .collect()
        }
    };

    let count: usize = rows.iter().map(Vec::len).sum();
    let first = TokenId::reserve(count);
    let tokens = rows.into_iter().flatten().enumerate().map(|(k, c)| {
        Token::with_id(first.offset(k), c.p0, c.p1, c.contrast)
            .with_cached_geometry(c.theta, c.length)
    });
    let store = TokenStore::from_tokens(w, h, tokens);

    debug!(
        "zero crossings ({:?}): {} tokens from {}x{} field in {:.3} ms",
        method,
        store.len(),
        w,
        h,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(store)
}

fn corner_samples(field: &ImageF64, i: usize, j: usize) -> [f64; 4] {
    let top = field.row(i);
    let bottom = field.row(i + 1);
    [top[j], top[j + 1], bottom[j], bottom[j + 1]]
}

fn crossings_in_row(fields: &GeometryFields, i: usize, method: CrossingMethod) -> Vec<Crossing> {
    let w = fields.width();
    let mut out = Vec::new();
    for j in 0..w.saturating_sub(1) {
        let corners = Corners {
            lapl: corner_samples(&fields.lapl, i, j),
            gx: corner_samples(&fields.gx, i, j),
            gy: corner_samples(&fields.gy, i, j),
        };
        if let Some(crossing) = crossing_at(i, j, &corners, method) {
            out.push(crossing);
        }
    }
    out
}

#[cfg(test)]
mod tests;

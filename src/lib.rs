#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod sketch;

// Pipeline stages and their building blocks.
pub mod angle;
pub mod bixel;
pub mod config;
pub mod fields;
pub mod link;
pub mod replace;
pub mod schedule;
pub mod svd;
pub mod zero_crossings;

// --- High-level re-exports -------------------------------------------------

// Main entry points: sketcher + results.
pub use crate::error::{Result, SketchError};
pub use crate::pipeline::{link_replace_cycle, run_cycle, CycleOutput, SketchParams, SketchResult, Sketcher};
pub use crate::sketch::{po_merge, union, Endpoint, Token, TokenId, TokenStore};

// Reports returned by the sketcher.
pub use crate::diagnostics::{CycleReport, RoundReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use boldt_sketch::prelude::*;
///
/// # fn main() -> boldt_sketch::Result<()> {
/// let intensity = ImageF64::from_fn(64, 48, |x, _| if x < 32 { 0.0 } else { 1.0 });
/// let result = Sketcher::new(SketchParams::default()).process(&intensity)?;
/// for token in result.sketch.iter() {
///     println!("{:?} -> {:?} contrast={:.2}", token.p0, token.p1, token.contrast);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF64, ImageU8};
    pub use crate::{SketchParams, SketchResult, Sketcher, Token, TokenStore};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::bixel::{BixelGrid, GridGeometry, GridMode};
    pub use crate::fields::GeometryFields;
    pub use crate::link::{po_link, LinkSummary};
    pub use crate::replace::{po_replace, ReplaceSummary};
    pub use crate::schedule::{LinkParams, ReplaceParams, Schedule};
    pub use crate::svd::{JacobiSvd, SvdReport};
    pub use crate::zero_crossings::{extract_zero_crossings, CrossingMethod};
}

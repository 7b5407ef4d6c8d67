//! Circle queries against a [`BixelGrid`].
use super::{BixelGrid, GridMode};
use crate::sketch::{dist_sq, Endpoint, Token};
use std::collections::HashSet;

/// True when the closed segment `p0–p1` meets the circle of `radius` around
/// `center`. Solves `|p0 + t(p1 - p0) - center|² = r²` and accepts a real
/// root with `t` in `[0, 1]`; a zero-length segment is tested as a point.
pub fn segment_intersects_circle(p0: [f64; 2], p1: [f64; 2], center: [f64; 2], radius: f64) -> bool {
    let d = [p1[0] - p0[0], p1[1] - p0[1]];
    let f = [p0[0] - center[0], p0[1] - center[1]];
    let a = d[0] * d[0] + d[1] * d[1];
    let rr = radius * radius;
    if a == 0.0 {
        return dist_sq(p0, center) <= rr;
    }
    let b = 2.0 * (f[0] * d[0] + f[1] * d[1]);
    let c = f[0] * f[0] + f[1] * f[1] - rr;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return false;
    }
    let s = disc.sqrt();
    let t1 = (-b - s) / (2.0 * a);
    let t2 = (-b + s) / (2.0 * a);
    (0.0..=1.0).contains(&t1) || (0.0..=1.0).contains(&t2)
}

/// Whole-segment membership test: either endpoint strictly inside, or the
/// segment crosses the circle.
pub fn token_touches_circle(token: &Token, center: [f64; 2], radius: f64) -> bool {
    let rr = radius * radius;
    dist_sq(token.p0, center) < rr
        || dist_sq(token.p1, center) < rr
        || segment_intersects_circle(token.p0, token.p1, center, radius)
}

impl BixelGrid {
    fn scan<F>(&self, x: f64, y: f64, radius: f64, mut keep: F) -> Vec<usize>
    where
        F: FnMut(usize) -> bool,
    {
        let mut out = Vec::new();
        if !(x.is_finite() && y.is_finite() && radius >= 0.0) {
            return out;
        }
        let (row0, row1, col0, col1) = self.geometry.circle_cells(x, y, radius);
        let mut seen = HashSet::new();
        for row in row0..row1 {
            for col in col0..col1 {
                for &idx in self.cell(row, col) {
                    if seen.insert(idx) && keep(idx) {
                        out.push(idx);
                    }
                }
            }
        }
        out
    }

    /// Tokens whose body meets the circle. `tokens` must be the slice the
    /// grid was built from. An endpoint grid does not index token bodies, so
    /// it answers with an exact scan of `tokens`.
    pub fn tokens_in_circle(&self, tokens: &[Token], x: f64, y: f64, radius: f64) -> Vec<usize> {
        let center = [x, y];
        if self.mode == GridMode::Endpoints {
            return tokens
                .iter()
                .enumerate()
                .filter(|(_, t)| token_touches_circle(t, center, radius))
                .map(|(idx, _)| idx)
                .collect();
        }
        self.scan(x, y, radius, |idx| {
            tokens
                .get(idx)
                .is_some_and(|t| token_touches_circle(t, center, radius))
        })
    }

    /// Tokens whose `which` endpoint lies strictly inside the circle.
    pub fn endpoints_in_circle(
        &self,
        tokens: &[Token],
        x: f64,
        y: f64,
        radius: f64,
        which: Endpoint,
    ) -> Vec<usize> {
        let center = [x, y];
        let rr = radius * radius;
        self.scan(x, y, radius, |idx| {
            tokens
                .get(idx)
                .is_some_and(|t| dist_sq(t.endpoint(which), center) < rr)
        })
    }
}

//! Angle helpers for token directions.
//!
//! Token directions are signed (`atan2(dy, dx)` in `(-π, π]`): a token and its
//! reverse differ by π. Comparisons therefore wrap modulo 2π, not π.
use std::f64::consts::TAU;

/// Floored remainder `x mod y`, always in `[0, y)` for positive `y`.
#[inline]
pub fn remainder(x: f64, y: f64) -> f64 {
    let ratio = x / y;
    y * (ratio - ratio.floor())
}

/// Signed difference `a - b` wrapped into `[0, 2π)`.
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    remainder(a - b, TAU)
}

/// Unsigned difference between two directions along the shorter arc, in `[0, π]`.
#[inline]
pub fn shorter_arc(a: f64, b: f64) -> f64 {
    let delta = angle_difference(a, b).abs();
    delta.min(TAU - delta)
}

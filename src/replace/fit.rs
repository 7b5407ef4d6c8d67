//! Orthogonal line fit through the endpoints of a 2- or 3-token path.
//!
//! The direction is the dominant axis of the endpoints' 2×2 scatter matrix,
//! obtained with the Jacobi SVD. Every endpoint is projected onto the line
//! through the centroid along that axis; the synthesized token runs between
//! the projections of the path's outer endpoints.
use crate::sketch::{dist_sq, Token};
use crate::svd::JacobiSvd;
use nalgebra::DMatrix;

/// Geometry and quality of one candidate path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFit {
    /// Projection of the path's first endpoint
    pub start: [f64; 2],
    /// Projection of the path's last endpoint
    pub end: [f64; 2],
    /// Distance between `start` and `end`
    pub span: f64,
    /// Coverage-weighted mean squared perpendicular distance over `span²`
    pub error: f64,
    /// Coverage-weighted projected length, net of joint overlaps, over `span`
    pub cumulative_coverage: f64,
    /// Projected length net of joint overlaps, over `span`
    pub coverage: f64,
}

/// Principal direction (unit vector) and centroid of a point cloud.
pub fn principal_axis(points: &[[f64; 2]]) -> Option<([f64; 2], [f64; 2])> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut scatter = DMatrix::zeros(2, 2);
    for p in points {
        let (dx, dy) = (p[0] - cx, p[1] - cy);
        scatter[(0, 0)] += dx * dx;
        scatter[(0, 1)] += dx * dy;
        scatter[(1, 1)] += dy * dy;
    }
    scatter[(1, 0)] = scatter[(0, 1)];

    let axis = JacobiSvd::decompose(&scatter).dominant_axis()?;
    let norm = axis[0].hypot(axis[1]);
    if !(norm.is_finite() && norm > 0.0) {
        return None;
    }
    Some(([axis[0] / norm, axis[1] / norm], [cx, cy]))
}

/// Fit the path `left? → center → right?`. `None` for degenerate geometry
/// (coincident outer endpoints, no dominant axis, non-finite values).
pub fn fit_path(left: Option<&Token>, center: &Token, right: Option<&Token>) -> Option<PathFit> {
    let tokens: Vec<&Token> = left
        .into_iter()
        .chain(std::iter::once(center))
        .chain(right)
        .collect();
    let points: Vec<[f64; 2]> = tokens.iter().flat_map(|t| [t.p0, t.p1]).collect();
    let (axis, centroid) = principal_axis(&points)?;

    let along = |p: [f64; 2]| (p[0] - centroid[0]) * axis[0] + (p[1] - centroid[1]) * axis[1];
    let foot = |t: f64| [centroid[0] + t * axis[0], centroid[1] + t * axis[1]];

    let first = tokens.first()?.p0;
    let last = tokens.last()?.p1;
    let (t_first, t_last) = (along(first), along(last));
    let span = (t_last - t_first).abs();
    if !(span.is_finite() && span > 0.0) {
        return None;
    }

    let mut weighted = 0.0;
    let mut weight = 0.0;
    for t in &tokens {
        for p in [t.p0, t.p1] {
            weighted += t.coverage * dist_sq(p, foot(along(p)));
            weight += t.coverage;
        }
    }
    if !(weight > 0.0) {
        return None;
    }
    let error = weighted / weight / (span * span);

    let projected_len = |t: &Token| (along(t.p1) - along(t.p0)).abs();
    let overlap = |outer: &Token, outer_end: [f64; 2], inner_end: [f64; 2]| {
        let m = projected_len(outer);
        let n = (along(outer_end) - along(inner_end)).abs();
        if n < m {
            m - n
        } else {
            0.0
        }
    };
    let o_left = left.map_or(0.0, |a| overlap(a, a.p0, center.p0));
    let o_right = right.map_or(0.0, |b| overlap(b, b.p1, center.p1));

    let plain: f64 = tokens.iter().map(|t| projected_len(t)).sum();
    let cumulative: f64 = tokens.iter().map(|t| projected_len(t) * t.coverage).sum();

    let fit = PathFit {
        start: foot(t_first),
        end: foot(t_last),
        span,
        error,
        cumulative_coverage: (cumulative - o_left - o_right) / span,
        coverage: (plain - o_left - o_right) / span,
    };
    (fit.error.is_finite() && fit.cumulative_coverage.is_finite() && fit.coverage.is_finite())
        .then_some(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(p0: [f64; 2], p1: [f64; 2]) -> Token {
        Token::new(p0, p1, 1.0)
    }

    #[test]
    fn collinear_triple_fits_exactly() {
        let a = tok([0.0, 0.0], [1.0, 1.0]);
        let t = tok([1.0, 1.0], [2.0, 2.0]);
        let b = tok([2.0, 2.0], [3.0, 3.0]);
        let fit = fit_path(Some(&a), &t, Some(&b)).expect("fit");
        assert!(fit.error < 1e-20, "error {}", fit.error);
        assert!((fit.span - 18f64.sqrt()).abs() < 1e-9);
        assert!((fit.start[0]).abs() < 1e-9 && (fit.end[0] - 3.0).abs() < 1e-9);
        assert!((fit.coverage - 1.0).abs() < 1e-9);
        assert!((fit.cumulative_coverage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bent_path_has_larger_error() {
        let a = tok([0.0, 0.0], [1.0, 0.0]);
        let t = tok([1.0, 0.0], [2.0, 0.0]);
        let straight = tok([2.0, 0.0], [3.0, 0.0]);
        let bent = tok([2.0, 0.0], [2.0, 1.0]);
        let e_straight = fit_path(Some(&a), &t, Some(&straight)).unwrap().error;
        let e_bent = fit_path(Some(&a), &t, Some(&bent)).unwrap().error;
        assert!(e_bent > e_straight);
        assert!(e_bent > 0.005);
    }

    #[test]
    fn error_is_scale_free() {
        let fit_at = |s: f64| {
            let a = tok([0.0, 0.0], [s, 0.1 * s]);
            let t = tok([s, 0.1 * s], [2.0 * s, 0.0]);
            fit_path(Some(&a), &t, None).unwrap().error
        };
        assert!((fit_at(1.0) - fit_at(10.0)).abs() < 1e-12);
    }

    #[test]
    fn gaps_reduce_coverage() {
        let a = tok([0.0, 0.0], [1.0, 0.0]);
        let t = tok([2.0, 0.0], [3.0, 0.0]);
        let fit = fit_path(Some(&a), &t, None).unwrap();
        assert!((fit.coverage - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_at_joint_is_not_double_counted() {
        let a = tok([0.0, 0.0], [2.0, 0.0]);
        let t = tok([1.0, 0.0], [3.0, 0.0]);
        let fit = fit_path(Some(&a), &t, None).unwrap();
        assert!((fit.coverage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_outer_endpoints_are_degenerate() {
        let a = tok([0.0, 0.0], [1.0, 0.0]);
        let t = tok([1.0, 0.0], [0.0, 0.0]);
        assert!(fit_path(Some(&a), &t, None).is_none());
    }
}

//! Sign classification and chord interpolation for one 2×2 cell.
//!
//! Corner layout, row `i` above row `i + 1`:
//!
//! ```text
//! l00 -- l01
//!  |      |
//! l10 -- l11
//! ```
//!
//! Bit k of the code is set when the corresponding corner (00, 01, 10, 11) is
//! strictly positive. The chord direction of each code keeps the positive side
//! on a fixed hand, so neighbouring cells along one contour chain head to
//! tail.
use super::CrossingMethod;

/// Laplacian and gradient samples at the four corners of a cell.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Corners {
    pub lapl: [f64; 4],
    pub gx: [f64; 4],
    pub gy: [f64; 4],
}

/// Geometry of one emitted crossing, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Crossing {
    pub p0: [f64; 2],
    pub p1: [f64; 2],
    pub contrast: f64,
    pub theta: f64,
    pub length: f64,
}

/// 4-bit sign code; 0 when any corner is exactly zero.
pub(crate) fn sign_code(lapl: [f64; 4]) -> u8 {
    if lapl.iter().any(|&v| v == 0.0) {
        return 0;
    }
    lapl.iter()
        .enumerate()
        .fold(0u8, |code, (bit, &v)| if v > 0.0 { code | (1 << bit) } else { code })
}

/// Chord endpoints for `code` in cell `(i, j)`, `None` for the uniform codes
/// 0 and 15 and the saddles 6 and 9.
pub(crate) fn chord(code: u8, i: usize, j: usize, lapl: [f64; 4]) -> Option<([f64; 2], [f64; 2])> {
    let [l00, l01, l10, l11] = lapl;
    let (x, y) = (j as f64, i as f64);
    let top = || [x + l00 / (l00 - l01), y];
    let bottom = || [x + l10 / (l10 - l11), y + 1.0];
    let left = || [x, y + l00 / (l00 - l10)];
    let right = || [x + 1.0, y + l01 / (l01 - l11)];

    let endpoints = match code {
        1 => (top(), left()),
        2 => (right(), top()),
        3 => (right(), left()),
        4 => (left(), bottom()),
        5 => (top(), bottom()),
        7 => (right(), bottom()),
        8 => (bottom(), right()),
        10 => (bottom(), top()),
        11 => (bottom(), left()),
        12 => (left(), right()),
        13 => (top(), right()),
        14 => (left(), top()),
        _ => return None,
    };
    Some(endpoints)
}

/// Bilinear interpolation over the unit cell at local `(x, y)`.
#[inline]
pub(crate) fn interpolate(f: [f64; 4], x: f64, y: f64) -> f64 {
    let [f00, f01, f10, f11] = f;
    (f01 - f00) * x + (f10 - f00) * y + (f11 + f00 - f10 - f01) * x * y + f00
}

/// Classify the cell and build its token geometry, or `None` when the cell
/// has no usable crossing.
pub(crate) fn crossing_at(
    i: usize,
    j: usize,
    corners: &Corners,
    method: CrossingMethod,
) -> Option<Crossing> {
    let code = sign_code(corners.lapl);
    let (p0, p1) = chord(code, i, j, corners.lapl)?;

    let dx = p1[0] - p0[0];
    let dy = p1[1] - p0[1];
    let chord_len = dx.hypot(dy);
    if !(chord_len.is_finite() && chord_len > 0.0) {
        return None;
    }

    let mid = [(p0[0] + p1[0]) * 0.5, (p0[1] + p1[1]) * 0.5];
    let (u, v) = (mid[0] - j as f64, mid[1] - i as f64);
    let gx = interpolate(corners.gx, u, v);
    let gy = interpolate(corners.gy, u, v);
    let contrast = gx.hypot(gy);
    if !(contrast.is_finite() && contrast > 0.0) {
        return None;
    }

    let crossing = match method {
        CrossingMethod::One => Crossing {
            p0,
            p1,
            contrast,
            theta: dy.atan2(dx),
            length: chord_len,
        },
        CrossingMethod::Two => unit_token(mid, (-gx).atan2(gy), contrast),
        CrossingMethod::Three => unit_token(p0, (-gx).atan2(gy), contrast),
    };
    Some(crossing)
}

fn unit_token(center: [f64; 2], theta: f64, contrast: f64) -> Crossing {
    let hx = theta.cos() * 0.5;
    let hy = theta.sin() * 0.5;
    Crossing {
        p0: [center[0] - hx, center[1] - hy],
        p1: [center[0] + hx, center[1] + hy],
        contrast,
        theta,
        length: 1.0,
    }
}

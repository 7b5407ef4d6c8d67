//! One-sided Jacobi SVD for small square matrices.
//!
//! Nash's column-rotation scheme (Compact Numerical Methods, alg. 1) in the
//! 2n×n storage layout: the top n rows hold the data and end up as `U·S`, the
//! bottom n rows start as the identity and accumulate `V`. Columns are rotated
//! pairwise until every pair is orthogonal to a relative tolerance or the sweep
//! ceiling `max(30, n/4)` is reached. Hitting the ceiling is not an error; the
//! current approximation is returned with `converged == false`.
//!
//! Only n = 2 is exercised by the path fitter, but nothing here assumes it.
use log::warn;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

const EPS: f64 = 1e-15;

/// Outcome of one decomposition.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SvdReport {
    /// Squared singular values, one per column of the working matrix
    pub s2: Vec<f64>,
    pub sweeps: usize,
    pub converged: bool,
}

/// Sweep ceiling for an n-column problem.
#[inline]
pub fn sweep_limit(n: usize) -> usize {
    (n / 4).max(30)
}

/// Decompose in place. `work` must have `2n` rows and `n` columns with the
/// input in the top n rows; the bottom n rows are overwritten.
///
/// On return the top block holds `U·S` and the bottom block holds `V` (not
/// `Vᵀ`), column `j` of each pairing with `s2[j]`.
pub fn svd_in_place(work: &mut DMatrix<f64>) -> SvdReport {
    let n = work.ncols();
    debug_assert_eq!(work.nrows(), 2 * n, "working matrix must be 2n x n");
    if n == 0 || work.nrows() < 2 * n {
        return SvdReport {
            converged: n == 0,
            ..SvdReport::default()
        };
    }

    let e2 = 10.0 * n as f64 * EPS * EPS;
    let tol = 0.1 * EPS;
    let limit = sweep_limit(n);
    for i in 0..n {
        for j in 0..n {
            work[(n + i, j)] = if i == j { 1.0 } else { 0.0 };
        }
    }

    let mut s2 = vec![0.0; n];
    let mut est_col_rank = n;
    let mut rot_count = n;
    let mut sweeps = 0;
    let converged = loop {
        if rot_count == 0 {
            break true;
        }
        if sweeps >= limit {
            warn!("jacobi svd: reached sweep ceiling {limit} for n={n}, using current approximation");
            break false;
        }
        sweeps += 1;
        rot_count = est_col_rank * est_col_rank.saturating_sub(1) / 2;

        for j in 0..est_col_rank.saturating_sub(1) {
            for k in (j + 1)..est_col_rank {
                let (mut p, mut q, mut r) = (0.0, 0.0, 0.0);
                for i in 0..n {
                    let x0 = work[(i, j)];
                    let y0 = work[(i, k)];
                    p += x0 * y0;
                    q += x0 * x0;
                    r += y0 * y0;
                }
                s2[j] = q;
                s2[k] = r;

                let (c0, s0) = if q >= r {
                    if q <= e2 * s2[0] || p.abs() <= tol * q {
                        rot_count -= 1;
                        continue;
                    }
                    p /= q;
                    r = 1.0 - r / q;
                    let vt = (4.0 * p * p + r * r).sqrt();
                    let c0 = (0.5 * (1.0 + r / vt)).sqrt();
                    (c0, p / (vt * c0))
                } else {
                    p /= r;
                    q = q / r - 1.0;
                    let vt = (4.0 * p * p + q * q).sqrt();
                    let mut s0 = (0.5 * (1.0 - q / vt)).sqrt();
                    if p < 0.0 {
                        s0 = -s0;
                    }
                    (p / (vt * s0), s0)
                };
                rotate_columns(work, j, k, c0, s0);
            }
        }

        while est_col_rank > 2 && s2[est_col_rank - 1] <= s2[0] * tol + tol * tol {
            est_col_rank -= 1;
        }
    };

    // Column norms after the last rotation, including columns the final sweep
    // did not revisit.
    for (j, s) in s2.iter_mut().enumerate() {
        *s = (0..n).map(|i| work[(i, j)] * work[(i, j)]).sum();
    }

    SvdReport {
        s2,
        sweeps,
        converged,
    }
}

#[inline]
fn rotate_columns(work: &mut DMatrix<f64>, j: usize, k: usize, c0: f64, s0: f64) {
    for i in 0..work.nrows() {
        let d1 = work[(i, j)];
        let d2 = work[(i, k)];
        work[(i, j)] = d1 * c0 + d2 * s0;
        work[(i, k)] = -d1 * s0 + d2 * c0;
    }
}

/// Decomposition `A = (U·S)·Vᵀ` of a square matrix.
#[derive(Clone, Debug)]
pub struct JacobiSvd {
    /// `U·S`, n×n
    pub us: DMatrix<f64>,
    /// Right singular vectors as columns, n×n
    pub v: DMatrix<f64>,
    pub report: SvdReport,
}

impl JacobiSvd {
    /// Decompose the square matrix `a`. Extra rows beyond `a.ncols()` are
    /// ignored.
    pub fn decompose(a: &DMatrix<f64>) -> Self {
        let n = a.ncols();
        let mut work = DMatrix::zeros(2 * n, n);
        for i in 0..a.nrows().min(n) {
            for j in 0..n {
                work[(i, j)] = a[(i, j)];
            }
        }
        let report = svd_in_place(&mut work);
        Self {
            us: work.rows(0, n).into_owned(),
            v: work.rows(n, n).into_owned(),
            report,
        }
    }

    pub fn singular_values(&self) -> Vec<f64> {
        self.report.s2.iter().map(|s| s.max(0.0).sqrt()).collect()
    }

    /// Column of `V` paired with the largest singular value.
    pub fn dominant_axis(&self) -> Option<DVector<f64>> {
        let (best, _) = self
            .report
            .s2
            .iter()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (j, &s)| match acc {
                Some((_, top)) if top >= s => acc,
                _ => Some((j, s)),
            })?;
        Some(self.v.column(best).into_owned())
    }
}

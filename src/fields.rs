//! Laplacian and gradient fields feeding zero-crossing extraction.
//!
//! - Convolves a fixed 3×3 kernel triple with border clamping (replicate).
//! - Outputs a Laplacian-like response `lapl`, a horizontal gradient `gx`
//!   (right minus left) and a vertical gradient `gy` (below minus above).
//! - The gradient kernels are Sobel weights scaled by 1/4, so a unit step
//!   produces a unit gradient.
//!
//! All three fields share the input's width and height, which is what
//! [`crate::zero_crossings`] requires.
//!
//! Complexity: O(W·H) per field; memory: three f64 buffers.
use crate::error::{Result, SketchError};
use crate::image::{ImageF64, ImageView, ImageViewMut};

type Kernel3 = [[f64; 3]; 3];

const LAPLACIAN_KERNEL: Kernel3 = [
    [-0.125, -0.125, -0.125],
    [-0.125, 1.0, -0.125],
    [-0.125, -0.125, -0.125],
];
const GRADIENT_KERNEL_X: Kernel3 = [[-0.25, 0.0, 0.25], [-0.5, 0.0, 0.5], [-0.25, 0.0, 0.25]];
const GRADIENT_KERNEL_Y: Kernel3 = [[-0.25, -0.5, -0.25], [0.0, 0.0, 0.0], [0.25, 0.5, 0.25]];

/// Co-registered Laplacian and gradient fields of one intensity field.
#[derive(Clone, Debug)]
pub struct GeometryFields {
    /// Laplacian-like response whose sign changes mark edges
    pub lapl: ImageF64,
    /// Horizontal derivative
    pub gx: ImageF64,
    /// Vertical derivative
    pub gy: ImageF64,
}

impl GeometryFields {
    /// Bundle externally produced fields, checking that they are co-registered.
    pub fn new(lapl: ImageF64, gx: ImageF64, gy: ImageF64) -> Result<Self> {
        let fields = Self { lapl, gx, gy };
        fields.validate()?;
        Ok(fields)
    }

    /// Check that all three fields share the Laplacian's size and hold
    /// `w * h` samples each.
    pub fn validate(&self) -> Result<()> {
        for field in [&self.gx, &self.gy] {
            if field.dims() != self.lapl.dims() {
                return Err(SketchError::DimensionMismatch {
                    expected: self.lapl.dims(),
                    found: field.dims(),
                });
            }
        }
        for field in [&self.lapl, &self.gx, &self.gy] {
            if field.data.len() != field.w * field.h || field.stride != field.w {
                return Err(SketchError::FieldLength {
                    expected: field.w * field.h,
                    found: field.data.len(),
                });
            }
        }
        Ok(())
    }

    /// Derive the three fields from raw intensities.
    pub fn from_intensity(intensity: &ImageF64) -> Self {
        Self {
            lapl: convolve3(intensity, &LAPLACIAN_KERNEL),
            gx: convolve3(intensity, &GRADIENT_KERNEL_X),
            gy: convolve3(intensity, &GRADIENT_KERNEL_Y),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.lapl.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.lapl.h
    }
}

fn convolve3(src: &ImageF64, kernel: &Kernel3) -> ImageF64 {
    let w = src.w;
    let h = src.h;
    let mut out = ImageF64::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let yi = y as isize;
        let rows = [src.row_clamped(yi - 1), src.row(y), src.row_clamped(yi + 1)];
        let out_row = out.row_mut(y);
        for (x, out_px) in out_row.iter_mut().enumerate() {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum = 0.0;
            for (k_row, src_row) in kernel.iter().zip(rows.iter()) {
                sum += src_row[x_idx[0]] * k_row[0]
                    + src_row[x_idx[1]] * k_row[1]
                    + src_row[x_idx[2]] * k_row[2];
            }
            *out_px = sum;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize, split_x: usize) -> ImageF64 {
        ImageF64::from_fn(w, h, |x, _| if x < split_x { 0.0 } else { 1.0 })
    }

    #[test]
    fn step_edge_has_unit_horizontal_gradient() {
        let fields = GeometryFields::from_intensity(&vertical_step(8, 6, 4));
        // Half of the kernel straddles the step on either adjacent column.
        assert!((fields.gx.get(3, 2) - 1.0).abs() < 1e-12);
        assert!((fields.gx.get(4, 2) - 1.0).abs() < 1e-12);
        assert_eq!(fields.gx.get(1, 2), 0.0);
        assert_eq!(fields.gy.get(3, 2), 0.0);
    }

    #[test]
    fn laplacian_changes_sign_across_step() {
        let fields = GeometryFields::from_intensity(&vertical_step(8, 6, 4));
        assert!(fields.lapl.get(3, 3) < 0.0);
        assert!(fields.lapl.get(4, 3) > 0.0);
        assert_eq!(fields.lapl.get(1, 3), 0.0);
        assert_eq!(fields.lapl.get(6, 3), 0.0);
    }

    #[test]
    fn new_rejects_mismatched_fields() {
        let err = GeometryFields::new(
            ImageF64::new(4, 4),
            ImageF64::new(4, 4),
            ImageF64::new(5, 4),
        )
        .unwrap_err();
        assert!(matches!(err, SketchError::DimensionMismatch { .. }));
    }
}

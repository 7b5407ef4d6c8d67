/// Read-only row access shared by the owned f64 field and borrowed 8-bit views.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Row `y` with the index clamped into the raster (replicate border).
    /// Panics on an empty raster.
    fn row_clamped(&self, y: isize) -> &[Self::Pixel] {
        let last = self.height().saturating_sub(1);
        self.row(y.clamp(0, last as isize) as usize)
    }

    fn rows(&self) -> impl Iterator<Item = &[Self::Pixel]> + '_ {
        (0..self.height()).map(move |y| self.row(y))
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

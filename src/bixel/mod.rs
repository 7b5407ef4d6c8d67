//! Bixel grid: uniform spatial buckets over a token store.
//!
//! A bixel is a grid cell (distinct from an image pixel) holding the arena
//! indices of tokens that touch it. The grid is sized from the link radius of
//! the pass that builds it, `rows = height / 2r`, `cols = width / 2r`, so a
//! circular query of radius `r` scans only a handful of cells.
//!
//! Two build modes:
//! - [`GridMode::WholeSegment`] rasterizes every token along its full extent.
//!   The rasterizer steps along the dominant axis one cell pitch at a time and
//!   inserts the cell rectangle spanned by each pair of consecutive samples,
//!   so corner-cutting segments are never missed. The end cell is always
//!   inserted. Geometry outside the canvas lands in the nearest border cell,
//!   which keeps queries near the border complete.
//! - [`GridMode::Endpoints`] inserts each token only into the cells holding its
//!   start and end points, for queries that care about endpoints alone.
//!
//! A grid is valid only for the token slice it was built from;
//! [`crate::sketch::TokenStore`] drops it whenever its tokens change.
//!
//! Complexity: build is O(total token extent / pitch); a query costs
//! O(r² / cell area) cells at uniform density.

mod query;

pub use query::{segment_intersects_circle, token_touches_circle};

use crate::sketch::Token;
use serde::{Deserialize, Serialize};

/// How tokens are entered into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    WholeSegment,
    Endpoints,
}

/// Resolution and pitch of a bixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub rows: usize,
    pub cols: usize,
    /// Cell width in canvas units
    pub dx: f64,
    /// Cell height in canvas units
    pub dy: f64,
}

impl GridGeometry {
    /// Cell counts `height / 2r` by `width / 2r`, at least one cell per axis
    /// and never finer than one canvas unit.
    pub fn for_radius(width: usize, height: usize, radius: f64) -> Self {
        let diameter = 2.0 * radius;
        let count = |extent: usize| -> usize {
            let max = extent.max(1);
            if diameter.is_finite() && diameter > 0.0 {
                ((extent as f64 / diameter) as usize).clamp(1, max)
            } else {
                1
            }
        };
        let rows = count(height);
        let cols = count(width);
        Self {
            rows,
            cols,
            dx: width.max(1) as f64 / cols as f64,
            dy: height.max(1) as f64 / rows as f64,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unclamped (row, col) of the cell containing `(x, y)`.
    #[inline]
    fn raw_cell(&self, x: f64, y: f64) -> (i64, i64) {
        ((y / self.dy).floor() as i64, (x / self.dx).floor() as i64)
    }

    /// Linear cell index of `(x, y)`, `None` outside the grid.
    pub fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (row, col) = self.raw_cell(x, y);
        self.linear(row, col)
    }

    #[inline]
    fn linear(&self, row: i64, col: i64) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i64 || col >= self.cols as i64 {
            None
        } else {
            Some(row as usize * self.cols + col as usize)
        }
    }

    /// Half-open cell rectangle `(row0, row1, col0, col1)` covering the
    /// bounding box of a circle, clamped to the grid the same way token
    /// geometry is.
    pub(crate) fn circle_cells(&self, x: f64, y: f64, radius: f64) -> (usize, usize, usize, usize) {
        let (lo_row, lo_col) = self.raw_cell(x - radius, y - radius);
        let (hi_row, hi_col) = self.raw_cell(x + radius, y + radius);
        let rows = self.rows as i64 - 1;
        let cols = self.cols as i64 - 1;
        (
            lo_row.clamp(0, rows) as usize,
            hi_row.clamp(0, rows) as usize + 1,
            lo_col.clamp(0, cols) as usize,
            hi_col.clamp(0, cols) as usize + 1,
        )
    }
}

/// Token buckets for one token slice.
#[derive(Clone, Debug)]
pub struct BixelGrid {
    geometry: GridGeometry,
    mode: GridMode,
    cells: Vec<Vec<usize>>,
}

impl BixelGrid {
    pub fn build(
        tokens: &[Token],
        width: usize,
        height: usize,
        radius: f64,
        mode: GridMode,
    ) -> Self {
        let geometry = GridGeometry::for_radius(width, height, radius);
        let mut grid = Self {
            geometry,
            mode,
            cells: vec![Vec::new(); geometry.len()],
        };
        for (idx, token) in tokens.iter().enumerate() {
            match mode {
                GridMode::WholeSegment => grid.rasterize(idx, token),
                GridMode::Endpoints => {
                    grid.insert_point(idx, token.p0);
                    grid.insert_point(idx, token.p1);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[inline]
    pub fn mode(&self) -> GridMode {
        self.mode
    }

    /// Arena indices stored in cell `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> &[usize] {
        if row >= self.geometry.rows || col >= self.geometry.cols {
            return &[];
        }
        &self.cells[row * self.geometry.cols + col]
    }

    /// Total number of (cell, token) entries.
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    #[inline]
    fn insert(&mut self, cell: usize, idx: usize) {
        let bucket = &mut self.cells[cell];
        // Tokens are inserted in index order, so a repeat is always the tail.
        if bucket.last() != Some(&idx) {
            bucket.push(idx);
        }
    }

    fn insert_point(&mut self, idx: usize, p: [f64; 2]) {
        if p[0].is_finite() && p[1].is_finite() {
            let cell = self.geometry.raw_cell(p[0], p[1]);
            self.insert_span(idx, cell, cell);
        }
    }

    fn insert_span(&mut self, idx: usize, a: (i64, i64), b: (i64, i64)) {
        let rows = self.geometry.rows as i64;
        let cols = self.geometry.cols as i64;
        let r0 = a.0.min(b.0).clamp(0, rows - 1);
        let r1 = a.0.max(b.0).clamp(0, rows - 1);
        let c0 = a.1.min(b.1).clamp(0, cols - 1);
        let c1 = a.1.max(b.1).clamp(0, cols - 1);
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(cell) = self.geometry.linear(row, col) {
                    self.insert(cell, idx);
                }
            }
        }
    }

    fn rasterize(&mut self, idx: usize, token: &Token) {
        let [x0, y0] = token.p0;
        let [x1, y1] = token.p1;
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let g = self.geometry;

        let mut samples: Vec<(i64, i64)> = Vec::new();
        if dx.abs() > dy.abs() {
            let steps = (dx.abs() / g.dx).floor() as usize;
            let step = g.dx.copysign(dx);
            for k in 0..=steps {
                let x = x0 + k as f64 * step;
                let y = y0 + (x - x0) * (dy / dx);
                samples.push(g.raw_cell(x, y));
            }
        } else {
            let steps = if dy == 0.0 {
                0
            } else {
                (dy.abs() / g.dy).floor() as usize
            };
            let step = g.dy.copysign(dy);
            for k in 0..=steps {
                let y = y0 + k as f64 * step;
                let x = if dy == 0.0 {
                    x0
                } else {
                    x0 + (y - y0) * (dx / dy)
                };
                samples.push(g.raw_cell(x, y));
            }
        }
        samples.push(g.raw_cell(x1, y1));

        for pair in samples.windows(2) {
            self.insert_span(idx, pair[0], pair[1]);
        }
    }
}

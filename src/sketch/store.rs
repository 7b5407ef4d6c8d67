use super::token::{Endpoint, Token};
use crate::angle::angle_difference;
use crate::bixel::{token_touches_circle, BixelGrid, GridGeometry, GridMode};
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Token arena for one canvas at one stage of the pipeline.
///
/// Tokens are addressed by their position in the arena. The optional bixel
/// grid indexes those positions and is discarded on every structural change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenStore {
    width: usize,
    height: usize,
    /// Display magnification for consumers of the export; 1 unless set.
    pub scale: f64,
    tokens: Vec<Token>,
    #[serde(skip)]
    grid: Option<BixelGrid>,
    #[serde(skip)]
    grid_geometry: Option<GridGeometry>,
}

impl TokenStore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            tokens: Vec::new(),
            grid: None,
            grid_geometry: None,
        }
    }

    pub fn from_tokens<I>(width: usize, height: usize, tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut store = Self::new(width, height);
        store.tokens = tokens.into_iter().collect();
        store
    }

    /// Empty store sharing this one's canvas, scale and grid resolution.
    pub fn empty_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            scale: self.scale,
            tokens: Vec::new(),
            grid: None,
            grid_geometry: self.grid_geometry,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Mutable access for annotation passes. Geometry must not change through
    /// this slice while a grid is built.
    pub(crate) fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Append a token and return its arena index.
    pub fn push(&mut self, token: Token) -> usize {
        self.grid = None;
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    pub fn extend<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
    {
        self.grid = None;
        self.tokens.extend(tokens);
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn grid(&self) -> Option<&BixelGrid> {
        self.grid.as_ref()
    }

    /// Resolution of the most recent grid, kept after the grid itself is
    /// dropped.
    pub fn grid_geometry(&self) -> Option<GridGeometry> {
        self.grid_geometry
    }

    /// Index the current tokens for queries of radius `radius`. The radius
    /// only shapes the grid geometry; `scale` is left alone.
    pub fn build_grid(&mut self, radius: f64, mode: GridMode) -> &BixelGrid {
        let grid = BixelGrid::build(&self.tokens, self.width, self.height, radius, mode);
        self.grid_geometry = Some(grid.geometry());
        debug!(
            "bixel grid {}x{} ({:?}) over {} tokens, {} entries",
            grid.geometry().rows,
            grid.geometry().cols,
            mode,
            self.tokens.len(),
            grid.occupancy()
        );
        self.grid.insert(grid)
    }

    /// Tokens whose body meets the circle. Falls back to a full scan when no
    /// whole-segment grid is present.
    pub fn tokens_in_circle(&self, x: f64, y: f64, radius: f64) -> Vec<usize> {
        match &self.grid {
            Some(grid) if grid.mode() == GridMode::WholeSegment => {
                grid.tokens_in_circle(&self.tokens, x, y, radius)
            }
            _ => {
                debug!("tokens_in_circle: no whole-segment grid, scanning {} tokens", self.tokens.len());
                let center = [x, y];
                self.tokens
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| token_touches_circle(t, center, radius))
                    .map(|(idx, _)| idx)
                    .collect()
            }
        }
    }

    /// Tokens whose `which` endpoint lies strictly inside the circle.
    pub fn endpoints_in_circle(&self, x: f64, y: f64, radius: f64, which: Endpoint) -> Vec<usize> {
        if let Some(grid) = &self.grid {
            return grid.endpoints_in_circle(&self.tokens, x, y, radius, which);
        }
        let center = [x, y];
        let rr = radius * radius;
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| super::dist_sq(t.endpoint(which), center) < rr)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// New store holding copies of the tokens accepted by `keep`. Links are
    /// dropped since arena positions change.
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Token) -> bool,
    {
        let mut out = self.empty_like();
        out.tokens = self
            .tokens
            .iter()
            .filter(|t| keep(t))
            .map(|t| {
                let mut copy = t.clone();
                copy.links_at_start.clear();
                copy.links_at_end.clear();
                copy
            })
            .collect();
        out
    }

    /// Tokens with `lower < contrast < upper`.
    pub fn filter_on_contrast(&self, lower: f64, upper: f64) -> Self {
        self.filter(|t| t.contrast > lower && t.contrast < upper)
    }

    /// Tokens whose direction lies on the counter-clockwise arc from `lower`
    /// to `upper`, which may wrap across ±π.
    pub fn filter_on_angle(&self, lower: f64, upper: f64) -> Self {
        self.filter(|t| {
            let theta = t.theta();
            angle_difference(theta, lower) <= PI && angle_difference(theta, upper) >= PI
        })
    }

    /// Tokens with `lower < length < upper`.
    pub fn filter_on_length(&self, lower: f64, upper: f64) -> Self {
        self.filter(|t| t.length() > lower && t.length() < upper)
    }

    /// Total number of directed links across both endpoints.
    pub fn link_count(&self) -> usize {
        self.tokens
            .iter()
            .map(|t| t.links_at_start.len() + t.links_at_end.len())
            .sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        crate::image::io::write_json_file(path, self)
    }
}

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a token. Copies carried between rounds keep their id, so
/// merge and union deduplicate by identity rather than by geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Allocate an id not handed out before in this process.
    pub fn fresh() -> Self {
        Self(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Reserve `count` consecutive ids and return the first one.
    pub fn reserve(count: usize) -> Self {
        Self(NEXT_TOKEN_ID.fetch_add(count as u64, Ordering::Relaxed))
    }

    pub(crate) fn offset(self, by: usize) -> Self {
        Self(self.0 + by as u64)
    }
}

/// Which end of a token a link or a query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub const BOTH: [Endpoint; 2] = [Endpoint::Start, Endpoint::End];

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        }
    }
}

/// Straight line token: fixed geometry plus the annotations mutated by the
/// link/replace passes.
///
/// Links are arena indices into the owning [`super::TokenStore`]; they are
/// meaningless outside it and are cleared whenever a token is carried into a
/// new store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub p0: [f64; 2],
    pub p1: [f64; 2],
    /// Gradient magnitude at the crossing, or a length-weighted mean for
    /// synthesized tokens.
    pub contrast: f64,
    /// Fraction of the represented span backed by zero-crossing tokens, in (0, 1].
    pub coverage: f64,
    /// Refinement rounds survived without being replaced.
    pub age: u32,
    pub replaced: bool,
    pub merged: bool,
    #[serde(skip)]
    pub links_at_start: Vec<usize>,
    #[serde(skip)]
    pub links_at_end: Vec<usize>,
    #[serde(skip)]
    theta: OnceLock<f64>,
    #[serde(skip)]
    length: OnceLock<f64>,
}

impl Token {
    pub fn new(p0: [f64; 2], p1: [f64; 2], contrast: f64) -> Self {
        Self::with_id(TokenId::fresh(), p0, p1, contrast)
    }

    pub(crate) fn with_id(id: TokenId, p0: [f64; 2], p1: [f64; 2], contrast: f64) -> Self {
        Self {
            id,
            p0,
            p1,
            contrast,
            coverage: 1.0,
            age: 0,
            replaced: false,
            merged: false,
            links_at_start: Vec::new(),
            links_at_end: Vec::new(),
            theta: OnceLock::new(),
            length: OnceLock::new(),
        }
    }

    /// Seed the cached direction and length with values the caller already
    /// knows, skipping the lazy computation from the endpoints.
    pub fn with_cached_geometry(self, theta: f64, length: f64) -> Self {
        let _ = self.theta.set(theta);
        let _ = self.length.set(length);
        self
    }

    pub fn with_coverage(mut self, coverage: f64) -> Self {
        self.coverage = coverage;
        self
    }

    /// Direction `atan2(dy, dx)` of the segment from `p0` to `p1`.
    pub fn theta(&self) -> f64 {
        *self.theta.get_or_init(|| {
            let dx = self.p1[0] - self.p0[0];
            let dy = self.p1[1] - self.p0[1];
            dy.atan2(dx)
        })
    }

    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| {
            let dx = self.p1[0] - self.p0[0];
            let dy = self.p1[1] - self.p0[1];
            dx.hypot(dy)
        })
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    #[inline]
    pub fn endpoint(&self, which: Endpoint) -> [f64; 2] {
        match which {
            Endpoint::Start => self.p0,
            Endpoint::End => self.p1,
        }
    }

    #[inline]
    pub fn links(&self, which: Endpoint) -> &[usize] {
        match which {
            Endpoint::Start => &self.links_at_start,
            Endpoint::End => &self.links_at_end,
        }
    }

    pub(crate) fn set_links(&mut self, which: Endpoint, links: Vec<usize>) {
        match which {
            Endpoint::Start => self.links_at_start = links,
            Endpoint::End => self.links_at_end = links,
        }
    }

    /// Copy carried into the next round: same identity, one round older,
    /// adjacency dropped until the next link pass.
    pub(crate) fn aged_copy(&self) -> Self {
        let mut next = self.clone();
        next.age += 1;
        next.links_at_start.clear();
        next.links_at_end.clear();
        next
    }
}

/// Squared distance between two points.
#[inline]
pub(crate) fn dist_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Squared distance from `p` to the infinite line through `a` and `b`.
/// `None` when `a` and `b` coincide.
#[inline]
pub(crate) fn point_line_dist_sq(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> Option<f64> {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return None;
    }
    let t = ((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len_sq;
    let u = a[0] + dx * t;
    let v = a[1] + dy * t;
    Some(dist_sq([u, v], p))
}

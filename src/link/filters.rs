//! Pairwise compatibility tests between a token and a link candidate.
//!
//! Each test returns `true` when the candidate is kept. They run in the order
//! self, contrast, direction, end projection, lateral distance.
use crate::angle::shorter_arc;
use crate::schedule::LinkParams;
use crate::sketch::{point_line_dist_sq, Endpoint, Token};

/// Candidate filter for one endpoint query of one token.
pub(crate) struct LinkFilter<'a> {
    pub token_idx: usize,
    pub token: &'a Token,
    pub which: Endpoint,
    pub params: &'a LinkParams,
}

impl LinkFilter<'_> {
    pub fn accepts(&self, idx: usize, candidate: &Token) -> bool {
        idx != self.token_idx
            && contrast_ratio_ok(self.token, candidate, self.params)
            && shorter_arc(self.token.theta(), candidate.theta()) <= self.params.max_delta_theta
            && end_projection_ok(self.token, self.which, candidate, self.params.max_end_project_rel)
            && lateral_ok(self.token, candidate, self.params.max_lateral_dist_sq)
    }
}

/// `candidate / token` contrast within `[min, max]`. Two zero contrasts
/// compare as equal.
pub(crate) fn contrast_ratio_ok(token: &Token, candidate: &Token, params: &LinkParams) -> bool {
    let ratio = if token.contrast == 0.0 && candidate.contrast == 0.0 {
        1.0
    } else {
        candidate.contrast / token.contrast
    };
    ratio.is_finite() && ratio >= params.contrast_ratio_min && ratio <= params.contrast_ratio_max
}

/// Projection of `p` on the axis from `origin` to `toward`, in units of the
/// axis length (0 at `origin`, 1 at `toward`).
#[inline]
fn relative_projection(origin: [f64; 2], toward: [f64; 2], len_sq: f64, p: [f64; 2]) -> f64 {
    ((p[0] - origin[0]) * (toward[0] - origin[0]) + (p[1] - origin[1]) * (toward[1] - origin[1]))
        / len_sq
}

/// The candidate must continue away from the queried endpoint.
///
/// Projections are measured from the queried endpoint back along the token.
/// The candidate's near endpoint may reach at most `max_rel` token lengths
/// back over the token, and must not project further back than its far
/// endpoint. A zero-length token has no axis and keeps nothing.
pub(crate) fn end_projection_ok(token: &Token, which: Endpoint, candidate: &Token, max_rel: f64) -> bool {
    let origin = token.endpoint(which);
    let toward = token.endpoint(which.opposite());
    let dx = toward[0] - origin[0];
    let dy = toward[1] - origin[1];
    let len_sq = dx * dx + dy * dy;
    if !(len_sq > 0.0) {
        return false;
    }
    let near = relative_projection(origin, toward, len_sq, candidate.endpoint(which.opposite()));
    let far = relative_projection(origin, toward, len_sq, candidate.endpoint(which));
    near <= max_rel && near >= far
}

/// Candidate midpoint within `sqrt(max_sq)` of the token's infinite line.
pub(crate) fn lateral_ok(token: &Token, candidate: &Token, max_sq: f64) -> bool {
    point_line_dist_sq(token.p0, token.p1, candidate.midpoint()).is_some_and(|d| d <= max_sq)
}

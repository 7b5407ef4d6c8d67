use crate::bixel::GridMode;
use serde::{Deserialize, Serialize};

/// Thresholds of one linking pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// How the bixel grid indexes tokens; also selects the query kind.
    pub grid_mode: GridMode,
    /// Neighbourhood radius around each endpoint.
    pub link_radius: f64,
    /// Accepted range of `candidate.contrast / token.contrast`.
    pub contrast_ratio_min: f64,
    pub contrast_ratio_max: f64,
    /// Largest direction difference in radians (shorter arc).
    pub max_delta_theta: f64,
    /// How far the candidate's near endpoint may reach back into the token,
    /// as a fraction of the token length.
    pub max_end_project_rel: f64,
    /// Largest squared distance from the candidate midpoint to the token's
    /// line.
    pub max_lateral_dist_sq: f64,
}

impl LinkParams {
    pub const fn new(
        grid_mode: GridMode,
        link_radius: f64,
        contrast_ratio_min: f64,
        contrast_ratio_max: f64,
        max_delta_theta: f64,
        max_end_project_rel: f64,
        max_lateral_dist_sq: f64,
    ) -> Self {
        Self {
            grid_mode,
            link_radius,
            contrast_ratio_min,
            contrast_ratio_max,
            max_delta_theta,
            max_end_project_rel,
            max_lateral_dist_sq,
        }
    }
}

impl Default for LinkParams {
    fn default() -> Self {
        super::tables::LINK_ROUNDS[0]
    }
}

/// Thresholds of one replacement pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceParams {
    /// Far endpoints of a path must lie within this distance of the centre
    /// token's midpoint.
    pub replace_radius: f64,
    /// Largest accepted fit error (dimensionless).
    pub straightness_max: f64,
    pub coverage_filter: bool,
    pub min_cumulative_coverage: f64,
    pub min_coverage: f64,
    /// Survivors older than this are dropped instead of carried forward.
    pub max_age: u32,
    /// Keep searching for the lowest-error path instead of taking the first
    /// acceptable one.
    pub prefer_straightest: bool,
}

impl ReplaceParams {
    pub const fn new(
        replace_radius: f64,
        straightness_max: f64,
        coverage_filter: bool,
        min_cumulative_coverage: f64,
        min_coverage: f64,
        max_age: u32,
        prefer_straightest: bool,
    ) -> Self {
        Self {
            replace_radius,
            straightness_max,
            coverage_filter,
            min_cumulative_coverage,
            min_coverage,
            max_age,
            prefer_straightest,
        }
    }
}

impl Default for ReplaceParams {
    fn default() -> Self {
        super::tables::REPLACE_ROUNDS[0]
    }
}

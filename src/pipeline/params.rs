use crate::schedule::{Schedule, DEFAULT_ROUNDS};
use crate::zero_crossings::CrossingMethod;
use serde::{Deserialize, Serialize};

/// Configuration of a full sketch run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchParams {
    /// Token placement used by zero-crossing extraction.
    pub crossing_method: CrossingMethod,
    /// Link/replace rounds to run; must not exceed the schedule length.
    pub rounds: usize,
    pub schedule: Schedule,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            crossing_method: CrossingMethod::One,
            rounds: DEFAULT_ROUNDS,
            schedule: Schedule::standard(),
        }
    }
}

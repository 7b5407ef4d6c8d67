use crate::pipeline::SketchParams;
use crate::schedule::{Schedule, DEFAULT_ROUNDS};
use crate::zero_crossings::CrossingMethod;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SketchToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub crossing_method: CrossingMethod,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Replaces the built-in round tables when present.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// Keep only tokens whose contrast lies strictly inside `[lower, upper]`.
    #[serde(default)]
    pub contrast_filter: Option<[f64; 2]>,
    pub output: SketchOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SketchOutputConfig {
    pub sketch_json: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_rounds() -> usize {
    DEFAULT_ROUNDS
}

impl SketchToolConfig {
    pub fn sketch_params(&self) -> SketchParams {
        SketchParams {
            crossing_method: self.crossing_method,
            rounds: self.rounds,
            schedule: self.schedule.clone().unwrap_or_default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<SketchToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

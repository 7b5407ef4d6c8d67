use serde::Serialize;
use std::time::Instant;

/// Wall-clock time of one named stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Stage timings of a sketch run in execution order, plus the end-to-end total.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

pub(crate) fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

impl TimingBreakdown {
    /// Close the stage that started at `since`.
    pub fn record(&mut self, label: &'static str, since: Instant) {
        self.stages.push(StageTiming {
            label,
            elapsed_ms: elapsed_ms(since),
        });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }

    /// Sum of the recorded stages; at most `total_ms`.
    pub fn staged_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}

use super::TimingBreakdown;
use crate::link::LinkSummary;
use crate::replace::ReplaceSummary;
use crate::zero_crossings::CrossingMethod;
use serde::Serialize;

/// Canvas the run was performed on.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// One link/replace round.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub round: usize,
    pub link_radius: f64,
    pub replace_radius: f64,
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub link: LinkSummary,
    pub replace: ReplaceSummary,
    pub elapsed_ms: f64,
}

/// Everything a full sketch run reports besides the token store itself.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub input: InputDescriptor,
    pub crossing_method: CrossingMethod,
    pub zero_crossings: usize,
    pub rounds: Vec<RoundReport>,
    pub merged_tokens: usize,
    pub timings: TimingBreakdown,
}

impl CycleReport {
    pub fn total_replacements(&self) -> usize {
        self.rounds.iter().map(|r| r.replace.synthesized()).sum()
    }

    /// One line per round, for terminal output.
    pub fn round_table(&self) -> String {
        let mut out = String::from("round  link_r  repl_r   tokens    links  3-paths  2-paths  dropped\n");
        for r in &self.rounds {
            out.push_str(&format!(
                "{:>5}  {:>6.1}  {:>6.1}  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}\n",
                r.round,
                r.link_radius,
                r.replace_radius,
                r.input_tokens,
                r.link.links,
                r.replace.triples,
                r.replace.left_pairs + r.replace.right_pairs,
                r.replace.dropped
            ));
        }
        out
    }
}

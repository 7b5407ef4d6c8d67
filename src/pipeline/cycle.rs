use crate::diagnostics::{elapsed_ms, RoundReport};
use crate::error::{Result, SketchError};
use crate::link::po_link;
use crate::replace::po_replace;
use crate::schedule::Schedule;
use crate::sketch::{po_merge, TokenStore};
use log::debug;
use std::time::Instant;

/// Token stores and reports of a link/replace cycle.
///
/// `stores[0]` is the cycle's input and `stores[i + 1]` the output of round
/// `i`. Every store except the last carries the links and `replaced` flags of
/// the round that consumed it.
#[derive(Clone, Debug)]
pub struct CycleOutput {
    pub stores: Vec<TokenStore>,
    pub reports: Vec<RoundReport>,
}

impl CycleOutput {
    /// Output of the last round (the input when no round ran).
    pub fn last_store(&self) -> Option<&TokenStore> {
        self.stores.last()
    }

    /// Merge every stage into the final sketch.
    pub fn merge(&mut self) -> Result<TokenStore> {
        po_merge(&mut self.stores)
    }
}

/// Run `rounds` link/replace rounds, feeding each round's output into the
/// next.
pub fn link_replace_cycle(initial: TokenStore, schedule: &Schedule, rounds: usize) -> Result<CycleOutput> {
    let available = schedule.validate()?;
    if rounds > available {
        return Err(SketchError::ScheduleExhausted {
            requested: rounds,
            available,
        });
    }

    let mut stores = Vec::with_capacity(rounds + 1);
    let mut reports = Vec::with_capacity(rounds);
    let mut current = initial;
    for round in 0..rounds {
        let Some((link_params, replace_params)) = schedule.round(round) else {
            return Err(SketchError::ScheduleExhausted {
                requested: rounds,
                available: round,
            });
        };
        let start = Instant::now();
        let input_tokens = current.len();
        let link = po_link(&mut current, link_params);
        let (next, replace) = po_replace(&mut current, replace_params);

        let report = RoundReport {
            round,
            link_radius: link_params.link_radius,
            replace_radius: replace_params.replace_radius,
            input_tokens,
            output_tokens: next.len(),
            link,
            replace,
            elapsed_ms: elapsed_ms(start),
        };
        debug!(
            "round {}: {} -> {} tokens ({} replacements) in {:.3} ms",
            round,
            report.input_tokens,
            report.output_tokens,
            report.replace.synthesized(),
            report.elapsed_ms
        );
        reports.push(report);
        stores.push(std::mem::replace(&mut current, next));
    }
    stores.push(current);

    Ok(CycleOutput { stores, reports })
}

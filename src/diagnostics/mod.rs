//! Reports produced by a sketch run.
//!
//! [`CycleReport`] is returned next to the merged token store by
//! [`crate::Sketcher::process`]; it carries one [`RoundReport`] per
//! link/replace round and a [`TimingBreakdown`] of the top-level stages.

mod cycle;
mod timing;

pub use cycle::{CycleReport, InputDescriptor, RoundReport};
pub(crate) use timing::elapsed_ms;
pub use timing::{StageTiming, TimingBreakdown};

//! End-to-end sketch pipeline.
//!
//! Intensity field → geometry fields → zero-crossing tokens → N rounds of
//! link/replace → merge. [`Sketcher`] runs the whole chain with
//! [`SketchParams`] and returns the merged store with a [`CycleReport`];
//! [`link_replace_cycle`] and [`run_cycle`] expose the pieces.
//!
//! Typical usage:
//! ```no_run
//! use boldt_sketch::{Sketcher, SketchParams};
//! use boldt_sketch::image::ImageF64;
//!
//! # fn example(intensity: ImageF64) -> boldt_sketch::Result<()> {
//! let sketcher = Sketcher::new(SketchParams::default());
//! let result = sketcher.process(&intensity)?;
//! println!("{} tokens", result.sketch.len());
//! # Ok(())
//! # }
//! ```

mod cycle;
mod params;

pub use cycle::{link_replace_cycle, CycleOutput};
pub use params::SketchParams;

use crate::diagnostics::{elapsed_ms, CycleReport, InputDescriptor, TimingBreakdown};
use crate::error::Result;
use crate::fields::GeometryFields;
use crate::image::{ImageF64, ImageU8};
use crate::schedule::Schedule;
use crate::sketch::TokenStore;
use crate::zero_crossings::{extract_zero_crossings, CrossingMethod};
use log::debug;
use std::time::Instant;

/// Merged sketch and the report of the run that produced it.
#[derive(Clone, Debug)]
pub struct SketchResult {
    pub sketch: TokenStore,
    pub report: CycleReport,
}

/// Runs the full pipeline with fixed parameters.
#[derive(Clone, Debug, Default)]
pub struct Sketcher {
    params: SketchParams,
}

impl Sketcher {
    pub fn new(params: SketchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    /// Sketch an 8-bit grayscale image (intensities taken as `0..=255`).
    pub fn process_u8(&self, gray: ImageU8<'_>) -> Result<SketchResult> {
        self.process(&ImageF64::from_u8(&gray))
    }

    pub fn process(&self, intensity: &ImageF64) -> Result<SketchResult> {
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();
        debug!(
            "Sketcher::process start w={} h={} rounds={}",
            intensity.w, intensity.h, self.params.rounds
        );

        let stage = Instant::now();
        let fields = GeometryFields::from_intensity(intensity);
        timings.record("fields", stage);

        let stage = Instant::now();
        let zero_crossings = extract_zero_crossings(&fields, self.params.crossing_method)?;
        let zero_crossing_count = zero_crossings.len();
        timings.record("zero_crossings", stage);

        let stage = Instant::now();
        let mut cycle = link_replace_cycle(zero_crossings, &self.params.schedule, self.params.rounds)?;
        timings.record("cycle", stage);

        let stage = Instant::now();
        let sketch = cycle.merge()?;
        timings.record("merge", stage);
        timings.total_ms = elapsed_ms(total);

        debug!(
            "Sketcher::process done: {} zero crossings -> {} tokens in {:.3} ms",
            zero_crossing_count,
            sketch.len(),
            timings.total_ms
        );
        let report = CycleReport {
            input: InputDescriptor {
                width: intensity.w,
                height: intensity.h,
            },
            crossing_method: self.params.crossing_method,
            zero_crossings: zero_crossing_count,
            rounds: cycle.reports,
            merged_tokens: sketch.len(),
            timings,
        };
        Ok(SketchResult { sketch, report })
    }
}

/// Standard pipeline on an intensity field: mode-one crossings, `rounds`
/// rounds of the standard schedule, merged.
pub fn run_cycle(intensity: &ImageF64, rounds: usize) -> Result<TokenStore> {
    let params = SketchParams {
        crossing_method: CrossingMethod::One,
        rounds,
        schedule: Schedule::standard(),
    };
    Ok(Sketcher::new(params).process(intensity)?.sketch)
}

#[cfg(test)]
mod tests;

//! Per-round parameter tables for the link/replace cycle.
//!
//! A [`Schedule`] pairs round `i` of the link table with round `i` of the
//! replace table. [`Schedule::standard`] reproduces the 18 rounds of the
//! reference multiscale configuration from immutable tables; custom schedules
//! deserialize from JSON.

mod params;
mod tables;

pub use params::{LinkParams, ReplaceParams};

use crate::error::{Result, SketchError};
use serde::{Deserialize, Serialize};

/// Default number of rounds run by the top-level sketcher.
pub const DEFAULT_ROUNDS: usize = 17;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub link: Vec<LinkParams>,
    pub replace: Vec<ReplaceParams>,
}

impl Schedule {
    pub fn standard() -> Self {
        Self {
            link: tables::LINK_ROUNDS.to_vec(),
            replace: tables::REPLACE_ROUNDS.to_vec(),
        }
    }

    /// Number of complete rounds; errors when the tables disagree.
    pub fn validate(&self) -> Result<usize> {
        if self.link.len() != self.replace.len() {
            return Err(SketchError::ScheduleMismatch {
                link: self.link.len(),
                replace: self.replace.len(),
            });
        }
        Ok(self.link.len())
    }

    /// Parameters of round `index`, if the schedule reaches that far.
    pub fn round(&self, index: usize) -> Option<(&LinkParams, &ReplaceParams)> {
        Some((self.link.get(index)?, self.replace.get(index)?))
    }

    pub fn len(&self) -> usize {
        self.link.len().min(self.replace.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::standard()
    }
}

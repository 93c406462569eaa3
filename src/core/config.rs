//! Game configuration.
//!
//! `NimConfig` bounds the random deal produced on every restart and selects
//! who controls `Player2`. The defaults reproduce the classic table:
//! 3 or 4 piles of 1 to 7 items each, against the computer.

use serde::{Deserialize, Serialize};

use super::error::NimError;
use super::player::Opponent;

/// Pile generation and seating configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimConfig {
    /// Minimum number of piles in a deal (inclusive).
    pub min_piles: usize,

    /// Maximum number of piles in a deal (inclusive).
    pub max_piles: usize,

    /// Minimum initial items per pile (inclusive).
    /// Must be at least 1 so a fresh deal is never already exhausted.
    pub min_count: u32,

    /// Maximum initial items per pile (inclusive).
    pub max_count: u32,

    /// Random seed for dealing.
    /// `None` draws a seed from OS entropy when the controller is built.
    pub seed: Option<u64>,

    /// Who controls Player2.
    pub opponent: Opponent,
}

impl Default for NimConfig {
    fn default() -> Self {
        Self {
            min_piles: 3,
            max_piles: 4,
            min_count: 1,
            max_count: 7,
            seed: None,
            opponent: Opponent::Computer,
        }
    }
}

impl NimConfig {
    /// Create a new config with custom pile-count bounds.
    pub fn with_piles(mut self, min: usize, max: usize) -> Self {
        self.min_piles = min;
        self.max_piles = max;
        self
    }

    /// Create a new config with custom per-pile item bounds.
    pub fn with_counts(mut self, min: u32, max: u32) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a different Player2 controller.
    pub fn with_opponent(mut self, opponent: Opponent) -> Self {
        self.opponent = opponent;
        self
    }

    /// Check that the bounds describe a non-empty, playable deal.
    pub fn validate(&self) -> Result<(), NimError> {
        if self.min_piles == 0 {
            return Err(NimError::InvalidConfig("min_piles must be > 0".to_string()));
        }
        if self.min_piles > self.max_piles {
            return Err(NimError::InvalidConfig(format!(
                "min_piles ({}) exceeds max_piles ({})",
                self.min_piles, self.max_piles
            )));
        }
        if self.min_count == 0 {
            return Err(NimError::InvalidConfig("min_count must be > 0".to_string()));
        }
        if self.min_count > self.max_count {
            return Err(NimError::InvalidConfig(format!(
                "min_count ({}) exceeds max_count ({})",
                self.min_count, self.max_count
            )));
        }
        Ok(())
    }
}

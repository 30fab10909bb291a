//! Engine and map configuration.
//!
//! - `EngineConfig`: dice, RNG seed, and movement pacing
//! - `MapSettings`: the parameters a map factory builds a board from
//!
//! Both are plain serde structs with builder-style setters. Validation
//! happens once at setup so a bad value never reaches a turn.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::rng::Dice;

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of faces on the die (default: 6).
    pub dice_sides: u32,

    /// Seed for dice rolls and cell-effect randomness.
    pub seed: u64,

    /// Pause after each unit step of a move, in milliseconds (default: 0).
    /// Only presentation front-ends that animate moves set this.
    pub step_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dice_sides: Dice::DEFAULT_SIDES,
            seed: 42,
            step_delay_ms: 0,
        }
    }
}

impl EngineConfig {
    pub fn with_dice_sides(mut self, sides: u32) -> Self {
        self.dice_sides = sides;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_step_delay_ms(mut self, delay: u64) -> Self {
        self.step_delay_ms = delay;
        self
    }

    /// Per-step pause as a `Duration`.
    #[must_use]
    pub fn step_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.dice_sides == 0 {
            return Err(GameError::InvalidConfig {
                reason: "dice_sides must be at least 1".into(),
            });
        }
        if self.dice_sides > Dice::MAX_SIDES {
            return Err(GameError::InvalidConfig {
                reason: format!("dice_sides must be at most {}", Dice::MAX_SIDES),
            });
        }
        Ok(())
    }
}

/// Parameters handed to a map factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub player_count: usize,

    /// Cells on each player's path, start and destination included.
    pub path_length: usize,

    /// Generator seed. Same seed and settings give the same board.
    pub seed: u64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            player_count: 4,
            path_length: 52,
            seed: 0,
        }
    }
}

impl MapSettings {
    #[must_use]
    pub fn new(player_count: usize, path_length: usize, seed: u64) -> Self {
        Self {
            player_count,
            path_length,
            seed,
        }
    }
}

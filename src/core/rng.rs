//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for dice, cell effects and
//!   map generation, so adding a random branch to one never shifts another
//!
//! ```
//! use dice_race::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut dice = rng.for_context("dice");
//! let mut effects = rng.for_context("effects");
//!
//! let roll = dice.gen_range(1..7);
//! assert!((1..7).contains(&roll));
//! let _ = effects.gen_bool(0.5);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

use super::error::GameError;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random integer in the given range.
    ///
    /// Panics on an empty range, like `rand`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }
}

/// Fair die with a configurable number of sides.
#[derive(Clone, Debug)]
pub struct Dice {
    sides: u32,
    rng: GameRng,
}

impl Dice {
    /// Standard six-sided die.
    pub const DEFAULT_SIDES: u32 = 6;

    /// Largest supported die. Doubled rolls must still fit a step count.
    pub const MAX_SIDES: u32 = 1000;

    /// Create a die with `1..=MAX_SIDES` sides.
    pub fn new(sides: u32, rng: GameRng) -> Result<Self, GameError> {
        if sides == 0 {
            return Err(GameError::InvalidConfig {
                reason: "dice must have at least one side".into(),
            });
        }
        if sides > Self::MAX_SIDES {
            return Err(GameError::InvalidConfig {
                reason: format!("dice cannot have more than {} sides", Self::MAX_SIDES),
            });
        }
        Ok(Self { sides, rng })
    }

    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Roll uniformly over `1..=sides`.
    pub fn roll(&mut self) -> u32 {
        self.rng.inner.gen_range(1..=self.sides)
    }
}

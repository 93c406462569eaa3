//! Deterministic random number generation for dealing piles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Replayable**: a deal's starting position fits in a seed and a counter
//! - **Injectable**: Tests pin a seed, frontends draw one from the OS
//!
//! ```
//! use nim_engine::core::GameRng;
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! assert_eq!(rng1.gen_inclusive(1, 7), rng2.gen_inclusive(1, 7));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used for pile generation.
///
/// Uses ChaCha8 for speed while keeping a reproducible, portable stream.
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

    /// Create an RNG seeded from operating system entropy.
    ///
    /// The chosen seed is still recorded, so the deal can be replayed from
    /// [`GameRng::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer uniformly in `low..=high`.
    ///
    /// Panics if `low > high`; callers validate bounds through
    /// [`NimConfig::validate`](crate::core::NimConfig::validate).
    pub fn gen_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.inner.gen_range(low..=high)
    }

    /// Generate a random usize uniformly in `low..=high`.
    pub fn gen_inclusive_usize(&mut self, low: usize, high: usize) -> usize {
        self.inner.gen_range(low..=high)
    }

    /// Capture the stream position, so the next deal can be drawn again.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume the stream at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Position in a seeded deal stream.
///
/// The controller records one per game; see
/// [`GameController::from_deal`](crate::controller::GameController::from_deal).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word counter at capture time.
    pub word_pos: u128,
}

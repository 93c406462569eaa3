//! Move representation: which pile, and how many items to take from it.
//!
//! A Nim move always touches exactly one pile and removes at least one item.
//! `Move` only describes the intent; [`PileSet::apply`](super::PileSet::apply)
//! validates it against the current counts.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// A single Nim move.
///
/// ```
/// use nim_engine::core::Move;
///
/// let take_two = Move::new(0, 2);
/// assert_eq!(take_two.pile, 0);
/// assert_eq!(take_two.amount, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Zero-based pile index.
    pub pile: usize,

    /// Number of items removed.
    pub amount: u32,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(pile: usize, amount: u32) -> Self {
        Self { pile, amount }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from pile {}", self.amount, self.pile)
    }
}

/// A move that was applied to the piles, as reported back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// Who made the move.
    pub player: Player,

    /// The move itself.
    pub mv: Move,

    /// Items left in the pile afterwards.
    pub remaining: u32,
}

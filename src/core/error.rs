//! Engine error taxonomy.
//!
//! `InvalidMove` and `NotApplicable` are recoverable: the controller turns
//! them into a [`CommandStatus`](crate::controller::CommandStatus) and the
//! game continues untouched. `InternalInvariantViolation` means the engine
//! itself is wrong and is surfaced to the caller as a hard error.

use serde::{Deserialize, Serialize};

/// Why a move or selection was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum InvalidMoveReason {
    /// Pile index past the end of the pile set.
    #[error("pile index out of range")]
    PileOutOfRange,
    /// A move must remove at least one item.
    #[error("amount must be at least 1")]
    ZeroAmount,
    /// More items requested than the pile holds.
    #[error("amount exceeds pile count")]
    AmountExceedsPile,
}

/// Why a command could not run in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum NotApplicableReason {
    /// The game is terminal; only a restart is accepted.
    #[error("game is over")]
    GameOver,
    /// Confirm was requested with nothing selected.
    #[error("selection is empty")]
    EmptySelection,
    /// A computer move was requested while a human is to move.
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    /// A human selection arrived while the computer is to move.
    #[error("it is the computer's turn")]
    ComputerTurn,
    /// Every pile is empty, there is nothing to take.
    #[error("all piles are empty")]
    NoMovesLeft,
}

/// Errors produced by the Nim engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NimError {
    #[error("invalid move on pile {pile} (amount {amount}): {reason}")]
    InvalidMove {
        pile: usize,
        amount: u32,
        reason: InvalidMoveReason,
    },

    #[error("item {ordinal} of pile {pile} is not on the table")]
    InvalidSelection { pile: usize, ordinal: u32 },

    #[error("command not applicable: {0}")]
    NotApplicable(NotApplicableReason),

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NimError {
    pub(crate) fn invalid_move(pile: usize, amount: u32, reason: InvalidMoveReason) -> Self {
        NimError::InvalidMove {
            pile,
            amount,
            reason,
        }
    }

    /// Check whether the game can continue after this error.
    ///
    /// Only internal invariant violations are fatal.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, NimError::InternalInvariantViolation(_))
    }
}

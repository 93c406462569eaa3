//! Move strategy for the automated opponent.
//!
//! The strategy is a pure function of the pile counts:
//! - `nim_sum`: XOR of every pile count
//! - `optimal_move`: restore a zero nim-sum, or take one item from the
//!   largest pile when the position is already balanced
//!
//! `MoveStrategy` is the seam the game state calls into; `NimSumStrategy`
//! is the only implementation.

mod optimal;

pub use optimal::{nim_sum, optimal_move, MoveStrategy, NimSumStrategy};

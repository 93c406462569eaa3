//! # nim-engine
//!
//! A two-player misère Nim engine with a perfect-play automated opponent.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: The engine takes abstract `(pile, ordinal)`
//!    identifiers. Windows, hit-testing, colors and pacing belong to the
//!    caller.
//!
//! 2. **Single Owner**: One `GameController` owns one `GameState`; all
//!    mutation goes through explicit commands.
//!
//! 3. **Deterministic**: Deals come from a seedable `GameRng` and the
//!    strategy is a pure function of the piles, so every game can be
//!    replayed from its seed.
//!
//! ## Rules
//!
//! - 3 or 4 piles of 1 to 7 items are dealt at random
//! - A move removes one or more items from a single pile
//! - Whoever takes the last item loses
//!
//! ## Modules
//!
//! - `core`: Players, piles, selection, moves, state machine, RNG, config, errors
//! - `strategy`: Nim-sum and the optimal-move computation
//! - `controller`: Command façade and read-only snapshots for frontends

pub mod core;
pub mod strategy;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{
    Player, Opponent,
    GameRng, GameRngState,
    NimConfig,
    NimError, InvalidMoveReason, NotApplicableReason,
    Move, AppliedMove,
    PileSet,
    SelectedItem, Selection, SelectionChange,
    GameState, MoveReport, Phase, TurnOutcome,
};

pub use crate::strategy::{nim_sum, optimal_move, MoveStrategy, NimSumStrategy};

pub use crate::controller::{CommandStatus, GameController, Snapshot};

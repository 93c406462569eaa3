//! Core engine types: players, piles, selection, moves, state, RNG, configuration.
//!
//! Nothing in here knows about rendering, pointer geometry or timing. A
//! presentation layer drives the engine through
//! [`GameController`](crate::controller::GameController).

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod piles;
pub mod selection;
pub mod state;

pub use player::{Opponent, Player};
pub use rng::{GameRng, GameRngState};
pub use config::NimConfig;
pub use error::{InvalidMoveReason, NimError, NotApplicableReason};
pub use action::{AppliedMove, Move};
pub use piles::PileSet;
pub use selection::{SelectedItem, Selection, SelectionChange};
pub use state::{GameState, MoveReport, Phase, TurnOutcome};

//! Public façade for presentation layers.
//!
//! A frontend owns one [`GameController`] and drives it with discrete
//! intents: restart, select, confirm, request a computer move. Every intent
//! answers with a [`CommandStatus`]; recoverable problems (a confirm with
//! nothing selected, a click on a missing item) come back as status values,
//! and only internal invariant violations surface as `Err`.
//!
//! ```
//! use nim_engine::controller::{CommandStatus, GameController};
//! use nim_engine::core::{NimConfig, PileSet, Player};
//!
//! let mut game = GameController::from_piles(
//!     PileSet::from_counts(vec![1, 3, 5]),
//!     NimConfig::default().with_seed(7),
//! )
//! .unwrap();
//!
//! game.select(1, 0).unwrap();
//! game.select(1, 1).unwrap();
//! assert!(matches!(game.confirm().unwrap(), CommandStatus::Moved(_)));
//!
//! let view = game.snapshot();
//! assert_eq!(view.piles, vec![1, 1, 5]);
//! assert_eq!(view.current_player, Player::Player2);
//! ```

mod game;
mod snapshot;

pub use game::{CommandStatus, GameController};
pub use snapshot::Snapshot;

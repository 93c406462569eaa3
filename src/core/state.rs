//! Game state: piles, pending selection and turn ownership.
//!
//! ## Phases
//!
//! - `AwaitingSelection`: the current player has nothing selected
//! - `AwaitingConfirmation`: items are selected, waiting for confirm
//! - `Terminal { loser }`: every pile is empty
//!
//! The phase is derived from the selection and the recorded loser, so it can
//! never disagree with them. Under the misère rule the player whose move
//! empties the last pile is the loser.
//!
//! Once terminal, every command except [`GameState::restart`] is refused
//! with `NotApplicable(GameOver)`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{AppliedMove, Move};
use super::error::{NimError, NotApplicableReason};
use super::piles::PileSet;
use super::player::{Opponent, Player};
use super::selection::{Selection, SelectionChange};
use crate::strategy::MoveStrategy;

/// Where the turn machine currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The current player has not selected anything yet.
    AwaitingSelection,
    /// The current player has a non-empty selection pending.
    AwaitingConfirmation,
    /// All piles are empty; `loser` took the last item.
    Terminal { loser: Player },
}

/// What happens after a move has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The game continues with this player to move.
    NextTurn(Player),
    /// The move emptied the last pile.
    GameOver { loser: Player },
}

/// Report for a successfully applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub applied: AppliedMove,
    pub outcome: TurnOutcome,
}

/// Complete state of one Nim game.
#[derive(Clone, Debug)]
pub struct GameState {
    piles: PileSet,
    selection: Selection,
    current_player: Player,
    loser: Option<Player>,
    opponent: Opponent,
}

impl GameState {
    /// Start a game on `piles` with Player1 to move.
    ///
    /// Fails with `InvalidConfig` if the piles hold no items.
    pub fn new(piles: PileSet, opponent: Opponent) -> Result<Self, NimError> {
        piles.ensure_playable()?;
        Ok(Self {
            piles,
            selection: Selection::new(),
            current_player: Player::Player1,
            loser: None,
            opponent,
        })
    }

    // === Queries ===

    /// Current pile counts.
    #[must_use]
    pub fn piles(&self) -> &PileSet {
        &self.piles
    }

    /// Pending selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Player to move (or, when terminal, the player who moved last).
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Who controls Player2.
    #[must_use]
    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    /// Loser of a finished game.
    #[must_use]
    pub fn loser(&self) -> Option<Player> {
        self.loser
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.loser.is_some()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.loser {
            Some(loser) => Phase::Terminal { loser },
            None if self.selection.is_empty() => Phase::AwaitingSelection,
            None => Phase::AwaitingConfirmation,
        }
    }

    /// Check if the automated strategy is the one to move.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        !self.is_terminal() && self.opponent.is_automated(self.current_player)
    }

    // === Commands ===

    /// Switch who controls Player2.
    ///
    /// A pending selection is dropped if its owner becomes automated.
    pub fn set_opponent(&mut self, opponent: Opponent) {
        self.opponent = opponent;
        if opponent.is_automated(self.current_player) {
            self.selection.clear();
        }
    }

    /// Select or deselect one item for the current player.
    ///
    /// Selecting from a pile other than the one already selected from is a
    /// no-op reported as [`SelectionChange::Ignored`].
    pub fn toggle_item(&mut self, pile: usize, ordinal: u32) -> Result<SelectionChange, NimError> {
        self.ensure_human_turn()?;

        let count = self
            .piles
            .count(pile)
            .ok_or(NimError::InvalidSelection { pile, ordinal })?;
        if ordinal >= count {
            return Err(NimError::InvalidSelection { pile, ordinal });
        }

        let change = self.selection.toggle(pile, ordinal, self.current_player);
        debug!(
            player = %self.current_player,
            pile,
            ordinal,
            ?change,
            selected = self.selection.len(),
            "selection toggled"
        );
        Ok(change)
    }

    /// Take every selected item from its pile and end the turn.
    ///
    /// On failure the piles and the selection are left as they were.
    pub fn confirm_move(&mut self) -> Result<MoveReport, NimError> {
        self.ensure_human_turn()?;

        let pile = self
            .selection
            .pile()
            .ok_or(NimError::NotApplicable(NotApplicableReason::EmptySelection))?;
        let amount = u32::try_from(self.selection.len()).map_err(|_| {
            NimError::InternalInvariantViolation("selection larger than u32::MAX".to_string())
        })?;

        let mv = Move::new(pile, amount);
        let remaining = self.piles.apply(mv)?;
        self.selection.clear();

        Ok(self.finish_turn(mv, remaining))
    }

    /// Let the automated strategy play Player2's move.
    pub fn computer_move(&mut self, strategy: &dyn MoveStrategy) -> Result<MoveReport, NimError> {
        if self.is_terminal() {
            return Err(NimError::NotApplicable(NotApplicableReason::GameOver));
        }
        if !self.opponent.is_automated(self.current_player) {
            return Err(NimError::NotApplicable(NotApplicableReason::NotComputerTurn));
        }

        let mv = strategy.choose_move(&self.piles)?;
        let remaining = self.piles.apply(mv).map_err(|err| {
            NimError::InternalInvariantViolation(format!("strategy produced illegal move {mv}: {err}"))
        })?;
        self.selection.clear();

        Ok(self.finish_turn(mv, remaining))
    }

    /// Start over on `piles`.
    ///
    /// With `computer_first`, Player2 opens: the automated strategy moves
    /// immediately and its report is returned, or, against a human Player2,
    /// the turn is simply handed over.
    ///
    /// Player1 is to move afterwards only when Player2 is
    /// [`Opponent::Computer`]. In hot-seat games `computer_first` leaves
    /// Player2 to move.
    ///
    /// Piles with no items are refused with `InvalidConfig` and the current
    /// game is kept.
    pub fn restart(
        &mut self,
        piles: PileSet,
        computer_first: bool,
        strategy: &dyn MoveStrategy,
    ) -> Result<Option<MoveReport>, NimError> {
        piles.ensure_playable()?;
        info!(piles = %piles, computer_first, opponent = ?self.opponent, "new game");

        self.piles = piles;
        self.selection.clear();
        self.loser = None;
        self.current_player = Player::Player1;

        if !computer_first {
            return Ok(None);
        }

        self.current_player = Player::Player2;
        if self.opponent == Opponent::Computer {
            self.computer_move(strategy).map(Some)
        } else {
            Ok(None)
        }
    }

    // === Internals ===

    fn ensure_human_turn(&self) -> Result<(), NimError> {
        if self.is_terminal() {
            return Err(NimError::NotApplicable(NotApplicableReason::GameOver));
        }
        if self.opponent.is_automated(self.current_player) {
            return Err(NimError::NotApplicable(NotApplicableReason::ComputerTurn));
        }
        Ok(())
    }

    fn finish_turn(&mut self, mv: Move, remaining: u32) -> MoveReport {
        let player = self.current_player;
        let applied = AppliedMove {
            player,
            mv,
            remaining,
        };

        let outcome = if self.piles.is_exhausted() {
            self.loser = Some(player);
            info!(loser = %player, "game over");
            TurnOutcome::GameOver { loser: player }
        } else {
            self.current_player = player.opponent();
            TurnOutcome::NextTurn(self.current_player)
        };

        debug!(%player, %mv, remaining, piles = %self.piles, ?outcome, "move applied");
        MoveReport { applied, outcome }
    }
}

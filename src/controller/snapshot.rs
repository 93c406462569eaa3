//! Read-only view of a game for rendering.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Opponent, Phase, Player, SelectedItem};

/// Owned copy of everything a frontend needs to draw the table.
///
/// Taking a snapshot never mutates the game, and the snapshot holds no
/// reference back into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pile counts in index order.
    pub piles: Vec<u32>,

    /// Items left on the table.
    pub items_left: u32,

    /// Selected items, each tagged with the selecting player.
    pub selection: Vec<SelectedItem>,

    /// Player to move (the last mover once terminal).
    pub current_player: Player,

    /// Turn machine phase.
    pub phase: Phase,

    /// Whether every pile is empty.
    pub terminal: bool,

    /// Who took the last item.
    pub loser: Option<Player>,

    /// Who controls Player2.
    pub opponent: Opponent,
}

impl Snapshot {
    /// Capture `state`.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            piles: state.piles().counts().to_vec(),
            items_left: state.piles().total_items(),
            selection: state.selection().items().to_vec(),
            current_player: state.current_player(),
            phase: state.phase(),
            terminal: state.is_terminal(),
            loser: state.loser(),
            opponent: state.opponent(),
        }
    }

    /// Check if an item is part of the pending selection.
    #[must_use]
    pub fn is_selected(&self, pile: usize, ordinal: u32) -> bool {
        self.selection
            .iter()
            .any(|s| s.pile == pile && s.ordinal == ordinal)
    }

    /// Winner of a finished game.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.loser.map(Player::opponent)
    }

    /// Check if the confirm control should be offered.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.phase == Phase::AwaitingConfirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PileSet;

    #[test]
    fn test_snapshot_of_fresh_game() {
        let state =
            GameState::new(PileSet::from_counts(vec![4, 1, 2]), Opponent::Computer).unwrap();
        let view = Snapshot::from_state(&state);

        assert_eq!(view.piles, vec![4, 1, 2]);
        assert_eq!(view.items_left, 7);
        assert!(view.selection.is_empty());
        assert_eq!(view.current_player, Player::Player1);
        assert_eq!(view.phase, Phase::AwaitingSelection);
        assert!(!view.terminal);
        assert_eq!(view.loser, None);
        assert_eq!(view.winner(), None);
        assert!(!view.can_confirm());
    }

    #[test]
    fn test_snapshot_tracks_selection() {
        let mut state =
            GameState::new(PileSet::from_counts(vec![4, 1, 2]), Opponent::Human).unwrap();
        state.toggle_item(0, 3).unwrap();
        let view = Snapshot::from_state(&state);

        assert!(view.is_selected(0, 3));
        assert!(!view.is_selected(0, 2));
        assert!(view.can_confirm());
        assert_eq!(view.selection[0].player, Player::Player1);
    }

    #[test]
    fn test_snapshot_winner() {
        let mut state = GameState::new(PileSet::from_counts(vec![1]), Opponent::Human).unwrap();
        state.toggle_item(0, 0).unwrap();
        state.confirm_move().unwrap();
        let view = Snapshot::from_state(&state);

        assert!(view.terminal);
        assert_eq!(view.items_left, 0);
        assert_eq!(view.loser, Some(Player::Player1));
        assert_eq!(view.winner(), Some(Player::Player2));
    }

    #[test]
    fn test_snapshot_serialization() {
        let state =
            GameState::new(PileSet::from_counts(vec![3, 5, 7]), Opponent::Computer).unwrap();
        let view = Snapshot::from_state(&state);

        let json = serde_json::to_string(&view).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(view, deserialized);
    }
}

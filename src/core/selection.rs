//! Pending item selection for a human move.
//!
//! Items are addressed by `(pile, ordinal)`. Every entry in a selection
//! belongs to the same pile; the pile is fixed by the first item picked and
//! released once the selection is emptied again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Player;

/// One selected item, tagged with the player who picked it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedItem {
    /// Zero-based pile index.
    pub pile: usize,
    /// Zero-based position of the item within the pile.
    pub ordinal: u32,
    /// Player who made the selection.
    pub player: Player,
}

/// Result of toggling an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    /// The item was added to the selection.
    Added,
    /// The item was already selected and has been removed.
    Removed,
    /// The item is on a different pile than the current selection.
    Ignored,
}

/// Items chosen for the pending move.
///
/// SmallVec keeps default-sized piles (at most 7 items) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    items: SmallVec<[SelectedItem; 8]>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `(pile, ordinal)` for `player`.
    ///
    /// Bounds checking against the pile counts is the caller's job.
    pub fn toggle(&mut self, pile: usize, ordinal: u32, player: Player) -> SelectionChange {
        let item = SelectedItem {
            pile,
            ordinal,
            player,
        };

        if let Some(pos) = self.items.iter().position(|&s| s == item) {
            self.items.remove(pos);
            return SelectionChange::Removed;
        }

        match self.pile() {
            Some(current) if current != pile => SelectionChange::Ignored,
            _ => {
                self.items.push(item);
                SelectionChange::Added
            }
        }
    }

    /// The pile the selection is locked to, if any.
    #[must_use]
    pub fn pile(&self) -> Option<usize> {
        self.items.first().map(|s| s.pile)
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if a specific item is selected.
    #[must_use]
    pub fn contains(&self, pile: usize, ordinal: u32) -> bool {
        self.items
            .iter()
            .any(|s| s.pile == pile && s.ordinal == ordinal)
    }

    /// Selected items in the order they were picked.
    #[must_use]
    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    /// Drop every selected item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

//! Player identification.
//!
//! Nim is strictly two-player: `Player1` always moves first after a plain
//! restart, `Player2` is either a second human or the automated opponent.

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[default]
    Player1,
    Player2,
}

impl Player {
    /// Both players in seating order.
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    /// Get the 1-based player number shown to humans.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The other player.
    ///
    /// ```
    /// use nim_engine::core::Player;
    ///
    /// assert_eq!(Player::Player1.opponent(), Player::Player2);
    /// assert_eq!(Player::Player2.opponent(), Player::Player1);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Who controls `Player2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opponent {
    /// Player2 moves are computed by the nim-sum strategy.
    #[default]
    Computer,
    /// Player2 is a second human selecting items like Player1 (hot-seat).
    Human,
}

impl Opponent {
    /// Check whether `player` is driven by the automated strategy.
    #[must_use]
    pub fn is_automated(self, player: Player) -> bool {
        self == Opponent::Computer && player == Player::Player2
    }
}

//! The ordered pile collection.
//!
//! A `PileSet` keeps its length for the whole game; only counts change, and
//! only downward. An exhausted pile (count 0) stays addressable by index.

use serde::{Deserialize, Serialize};

use super::action::Move;
use super::config::NimConfig;
use super::error::{InvalidMoveReason, NimError};
use super::rng::GameRng;

/// Ordered pile counts for one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileSet {
    counts: Vec<u32>,
}

impl PileSet {
    /// Deal a fresh pile set.
    ///
    /// The pile count is sampled uniformly from
    /// `config.min_piles..=config.max_piles`, then each pile's count
    /// independently from `config.min_count..=config.max_count`.
    ///
    /// `config` must already be validated.
    pub fn generate(config: &NimConfig, rng: &mut GameRng) -> Self {
        let len = rng.gen_inclusive_usize(config.min_piles, config.max_piles);
        let counts = (0..len)
            .map(|_| rng.gen_inclusive(config.min_count, config.max_count))
            .collect();
        Self { counts }
    }

    /// Build a pile set from explicit counts.
    ///
    /// ```
    /// use nim_engine::core::PileSet;
    ///
    /// let piles = PileSet::from_counts(vec![1, 2, 3]);
    /// assert_eq!(piles.len(), 3);
    /// assert_eq!(piles.count(2), Some(3));
    /// ```
    #[must_use]
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Number of piles (including exhausted ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if there are no piles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Items remaining in a pile, or `None` if the index is out of range.
    #[must_use]
    pub fn count(&self, index: usize) -> Option<u32> {
        self.counts.get(index).copied()
    }

    /// All counts in pile order.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Total items left across all piles.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Remove `amount` items from pile `index`.
    ///
    /// Returns the updated count. On error the pile set is unchanged.
    pub fn reduce(&mut self, index: usize, amount: u32) -> Result<u32, NimError> {
        let count = self
            .counts
            .get_mut(index)
            .ok_or_else(|| NimError::invalid_move(index, amount, InvalidMoveReason::PileOutOfRange))?;

        if amount == 0 {
            return Err(NimError::invalid_move(index, amount, InvalidMoveReason::ZeroAmount));
        }
        if amount > *count {
            return Err(NimError::invalid_move(
                index,
                amount,
                InvalidMoveReason::AmountExceedsPile,
            ));
        }

        *count -= amount;
        Ok(*count)
    }

    /// Apply a [`Move`]. Same validation as [`PileSet::reduce`].
    pub fn apply(&mut self, mv: Move) -> Result<u32, NimError> {
        self.reduce(mv.pile, mv.amount)
    }

    /// Check whether every pile is empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Check that a game can start on these piles.
    ///
    /// A table with no piles, or with every pile empty, has no first move.
    pub fn ensure_playable(&self) -> Result<(), NimError> {
        if self.is_exhausted() {
            return Err(NimError::InvalidConfig(format!(
                "cannot start a game on {self}: no items to take"
            )));
        }
        Ok(())
    }

    /// Index of the largest pile.
    ///
    /// Ties go to the lowest index. Returns 0 for an empty pile set.
    #[must_use]
    pub fn max_pile_index(&self) -> usize {
        let mut best = 0;
        for (index, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = index;
            }
        }
        best
    }

    /// Iterate over every legal move in pile order, smallest amount first.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(pile, &count)| (1..=count).map(move |amount| Move::new(pile, amount)))
    }
}

impl std::fmt::Display for PileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_respects_defaults() {
        let config = NimConfig::default();
        let mut rng = GameRng::new(42);

        for _ in 0..200 {
            let piles = PileSet::generate(&config, &mut rng);
            assert!((3..=4).contains(&piles.len()));
            assert!(piles.counts().iter().all(|c| (1..=7).contains(c)));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = NimConfig::default();
        let a = PileSet::generate(&config, &mut GameRng::new(5));
        let b = PileSet::generate(&config, &mut GameRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_fixed_shape() {
        let config = NimConfig::default().with_piles(5, 5).with_counts(2, 2);
        let piles = PileSet::generate(&config, &mut GameRng::new(1));
        assert_eq!(piles.counts(), &[2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_reduce_success() {
        let mut piles = PileSet::from_counts(vec![3, 4, 5]);
        assert_eq!(piles.reduce(1, 3), Ok(1));
        assert_eq!(piles.counts(), &[3, 1, 5]);

        assert_eq!(piles.reduce(0, 3), Ok(0));
        assert_eq!(piles.count(0), Some(0));
        assert_eq!(piles.len(), 3, "exhausted piles stay addressable");
    }

    #[test]
    fn test_reduce_failures_leave_piles_unchanged() {
        let mut piles = PileSet::from_counts(vec![3, 4, 5]);
        let before = piles.clone();

        let zero = piles.reduce(0, 0).unwrap_err();
        assert!(matches!(
            zero,
            NimError::InvalidMove { reason: InvalidMoveReason::ZeroAmount, .. }
        ));

        let too_many = piles.reduce(0, 4).unwrap_err();
        assert!(matches!(
            too_many,
            NimError::InvalidMove { reason: InvalidMoveReason::AmountExceedsPile, .. }
        ));

        let out_of_range = piles.reduce(3, 1).unwrap_err();
        assert!(matches!(
            out_of_range,
            NimError::InvalidMove { reason: InvalidMoveReason::PileOutOfRange, .. }
        ));

        assert_eq!(piles, before);
    }

    #[test]
    fn test_reduce_exhausted_pile_fails() {
        let mut piles = PileSet::from_counts(vec![0, 2]);
        assert!(piles.reduce(0, 1).is_err());
        assert_eq!(piles.counts(), &[0, 2]);
    }

    #[test]
    fn test_is_exhausted() {
        assert!(PileSet::from_counts(vec![0, 0, 0]).is_exhausted());
        assert!(!PileSet::from_counts(vec![0, 1, 0]).is_exhausted());
        assert!(!PileSet::from_counts(vec![7, 7, 7, 7]).is_exhausted());
    }

    #[test]
    fn test_ensure_playable() {
        assert!(PileSet::from_counts(vec![0, 1, 0]).ensure_playable().is_ok());
        assert!(matches!(
            PileSet::from_counts(vec![0, 0, 0]).ensure_playable(),
            Err(NimError::InvalidConfig(_))
        ));
        assert!(matches!(
            PileSet::from_counts(Vec::new()).ensure_playable(),
            Err(NimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_max_pile_index_first_occurrence() {
        assert_eq!(PileSet::from_counts(vec![1, 2, 3]).max_pile_index(), 2);
        assert_eq!(PileSet::from_counts(vec![5, 2, 5]).max_pile_index(), 0);
        assert_eq!(PileSet::from_counts(vec![1, 6, 6, 6]).max_pile_index(), 1);
        assert_eq!(PileSet::from_counts(vec![0, 0, 0]).max_pile_index(), 0);
    }

    #[test]
    fn test_legal_moves() {
        let piles = PileSet::from_counts(vec![2, 0, 1]);
        let moves: Vec<_> = piles.legal_moves().collect();
        assert_eq!(moves, vec![Move::new(0, 1), Move::new(0, 2), Move::new(2, 1)]);
    }

    #[test]
    fn test_total_items() {
        assert_eq!(PileSet::from_counts(vec![3, 4, 5]).total_items(), 12);
    }
}

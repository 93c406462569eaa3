//! Nim-sum strategy.

use crate::core::{Move, NimError, NotApplicableReason, PileSet};

/// XOR of all pile counts, folded left to right from 0.
///
/// ```
/// use nim_engine::core::PileSet;
/// use nim_engine::strategy::nim_sum;
///
/// assert_eq!(nim_sum(&PileSet::from_counts(vec![1, 2, 3])), 0);
/// assert_eq!(nim_sum(&PileSet::from_counts(vec![3, 4, 5])), 2);
/// ```
#[must_use]
pub fn nim_sum(piles: &PileSet) -> u32 {
    piles.counts().iter().fold(0, |acc, &count| acc ^ count)
}

/// Compute the move the automated opponent plays.
///
/// - Nim-sum 0: no move restores balance, so take 1 from the largest pile
///   (lowest index on ties).
/// - Otherwise: the first pile (by index) whose count shrinks when XORed
///   with the nim-sum is reduced to `count ^ nim_sum`, leaving a zero
///   nim-sum behind.
///
/// Fails with `NotApplicable(NoMovesLeft)` on an exhausted pile set and with
/// `InternalInvariantViolation` if no balancing pile exists for a nonzero
/// nim-sum, which the Nim theorem rules out.
pub fn optimal_move(piles: &PileSet) -> Result<Move, NimError> {
    if piles.is_exhausted() {
        return Err(NimError::NotApplicable(NotApplicableReason::NoMovesLeft));
    }

    let sum = nim_sum(piles);
    if sum == 0 {
        return Ok(Move::new(piles.max_pile_index(), 1));
    }

    piles
        .counts()
        .iter()
        .enumerate()
        .find_map(|(index, &count)| {
            let target = count ^ sum;
            (target < count).then(|| Move::new(index, count - target))
        })
        .ok_or_else(|| {
            tracing::error!(piles = %piles, nim_sum = sum, "no pile restores a zero nim-sum");
            NimError::InternalInvariantViolation(format!(
                "no balancing pile for nim-sum {sum} in {piles}"
            ))
        })
}

/// Strategy trait for choosing the automated player's move.
///
/// Must be deterministic: the same piles always yield the same move.
pub trait MoveStrategy: Send {
    /// Choose a move for the player about to act.
    fn choose_move(&self, piles: &PileSet) -> Result<Move, NimError>;
}

/// Perfect-play strategy based on the nim-sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct NimSumStrategy;

impl MoveStrategy for NimSumStrategy {
    fn choose_move(&self, piles: &PileSet) -> Result<Move, NimError> {
        optimal_move(piles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piles(counts: &[u32]) -> PileSet {
        PileSet::from_counts(counts.to_vec())
    }

    #[test]
    fn test_nim_sum() {
        assert_eq!(nim_sum(&piles(&[])), 0);
        assert_eq!(nim_sum(&piles(&[7])), 7);
        assert_eq!(nim_sum(&piles(&[1, 2, 3])), 0);
        assert_eq!(nim_sum(&piles(&[3, 4, 5])), 2);
        assert_eq!(nim_sum(&piles(&[1, 3, 5, 7])), 0);
    }

    #[test]
    fn test_balanced_position_takes_one_from_largest() {
        assert_eq!(optimal_move(&piles(&[1, 2, 3])), Ok(Move::new(2, 1)));
        assert_eq!(optimal_move(&piles(&[5, 5])), Ok(Move::new(0, 1)));
        assert_eq!(optimal_move(&piles(&[0, 4, 4])), Ok(Move::new(1, 1)));
    }

    #[test]
    fn test_unbalanced_position_first_balancing_pile() {
        // 3 ^ 2 = 1 < 3, so pile 0 drops from 3 to 1
        assert_eq!(optimal_move(&piles(&[3, 4, 5])), Ok(Move::new(0, 2)));
        // Single pile: take everything
        assert_eq!(optimal_move(&piles(&[6])), Ok(Move::new(0, 6)));
        // nim-sum 4: only pile 1 (count 4) shrinks
        assert_eq!(optimal_move(&piles(&[1, 4, 1])), Ok(Move::new(1, 4)));
    }

    #[test]
    fn test_exhausted_is_not_applicable() {
        assert_eq!(
            optimal_move(&piles(&[0, 0, 0])),
            Err(NimError::NotApplicable(NotApplicableReason::NoMovesLeft))
        );
    }

    #[test]
    fn test_strategy_trait_matches_function() {
        let position = piles(&[2, 6, 7, 1]);
        assert_eq!(NimSumStrategy.choose_move(&position), optimal_move(&position));
    }
}

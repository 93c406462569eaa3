//! Game controller.

use tracing::{debug, error, info};

use crate::core::{
    GameRng, GameRngState, GameState, Move, MoveReport, NimConfig, NimError, NotApplicableReason, Opponent,
    PileSet, SelectionChange,
};
use crate::strategy::{nim_sum, optimal_move, MoveStrategy, NimSumStrategy};

use super::snapshot::Snapshot;

/// Result of a controller command that did not hit an internal fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    /// A new game was dealt. `opening` holds the computer's first move when
    /// it opened the game.
    Restarted { opening: Option<MoveReport> },

    /// The selection changed (or the click was ignored).
    Selection(SelectionChange),

    /// A move was applied.
    Moved(MoveReport),

    /// The command is not valid in the current state; nothing changed.
    NotApplicable(NotApplicableReason),

    /// The command referenced something that is not on the table; nothing
    /// changed.
    Rejected(NimError),
}

impl CommandStatus {
    /// Check whether the command changed the game.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        match self {
            CommandStatus::Restarted { .. } | CommandStatus::Moved(_) => true,
            CommandStatus::Selection(change) => *change != SelectionChange::Ignored,
            CommandStatus::NotApplicable(_) | CommandStatus::Rejected(_) => false,
        }
    }

    /// The applied move, if the command produced one.
    #[must_use]
    pub fn move_report(&self) -> Option<&MoveReport> {
        match self {
            CommandStatus::Moved(report) => Some(report),
            CommandStatus::Restarted { opening } => opening.as_ref(),
            _ => None,
        }
    }
}

/// Owns one game and exposes it to a presentation layer.
///
/// Deals are drawn from a seeded [`GameRng`], so two controllers built from
/// the same config and seed replay the same sequence of games. A single
/// deal can be replayed from [`GameController::deal_state`].
pub struct GameController {
    config: NimConfig,
    rng: GameRng,
    state: GameState,
    /// RNG position the current game was dealt from; `None` for fixed piles.
    deal: Option<GameRngState>,
    strategy: Box<dyn MoveStrategy>,
}

impl GameController {
    /// Create a controller and deal the first game.
    ///
    /// Player1 moves first; call [`GameController::restart`] with
    /// `computer_first = true` to let the computer open instead.
    pub fn new(config: NimConfig) -> Result<Self, NimError> {
        let rng = Self::seeded_rng(&config);
        Self::with_rng(config, rng)
    }

    /// Create a controller drawing deals from an explicit RNG.
    ///
    /// `config.seed` is ignored in favour of `rng`.
    pub fn with_rng(config: NimConfig, mut rng: GameRng) -> Result<Self, NimError> {
        config.validate()?;
        let deal = rng.state();
        let piles = PileSet::generate(&config, &mut rng);
        info!(seed = rng.seed(), piles = %piles, "controller created");

        let state = GameState::new(piles, config.opponent)?;
        Ok(Self {
            config,
            rng,
            state,
            deal: Some(deal),
            strategy: Box::new(NimSumStrategy),
        })
    }

    /// Create a controller whose first game is the deal captured in `deal`.
    ///
    /// `deal` usually comes from [`GameController::deal_state`], possibly
    /// after a round trip through storage. Later restarts continue the same
    /// RNG stream, so the games that followed the captured one replay too.
    pub fn from_deal(config: NimConfig, deal: &GameRngState) -> Result<Self, NimError> {
        Self::with_rng(config, GameRng::from_state(deal))
    }

    /// Create a controller whose first game starts on fixed piles.
    ///
    /// Later restarts deal from `config` as usual. Piles with no items are
    /// refused with `InvalidConfig`.
    pub fn from_piles(piles: PileSet, config: NimConfig) -> Result<Self, NimError> {
        config.validate()?;
        let state = GameState::new(piles, config.opponent)?;
        let rng = Self::seeded_rng(&config);
        info!(seed = rng.seed(), piles = %state.piles(), "controller created on fixed piles");

        Ok(Self {
            config,
            rng,
            state,
            deal: None,
            strategy: Box::new(NimSumStrategy),
        })
    }

    /// Replace the automated opponent's strategy.
    pub fn with_strategy<S: MoveStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    // === Queries ===

    /// Owned view of the current game.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    /// Borrow the game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &NimConfig {
        &self.config
    }

    /// Seed of the deal RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// RNG position the current game was dealt from.
    ///
    /// Pass it to [`GameController::from_deal`] to play the same piles
    /// again. `None` when the game started from [`GameController::from_piles`].
    #[must_use]
    pub fn deal_state(&self) -> Option<&GameRngState> {
        self.deal.as_ref()
    }

    /// Nim-sum of the current piles.
    #[must_use]
    pub fn nim_sum(&self) -> u32 {
        nim_sum(self.state.piles())
    }

    /// Check if the automated opponent should move next.
    ///
    /// Frontends poll this to schedule [`GameController::request_computer_move`].
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        self.state.is_computer_turn()
    }

    /// The move perfect play suggests for whoever is to move.
    ///
    /// `None` once the game is over.
    pub fn hint(&self) -> Result<Option<Move>, NimError> {
        if self.state.is_terminal() {
            return Ok(None);
        }
        match optimal_move(self.state.piles()) {
            Ok(mv) => Ok(Some(mv)),
            Err(NimError::NotApplicable(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    // === Commands ===

    /// Deal a new game, discarding the current one.
    ///
    /// With `computer_first` Player2 opens; against the computer its move is
    /// applied before this returns, so Player1 is to move afterwards. That
    /// holds only for [`Opponent::Computer`]: in hot-seat games Player2 is
    /// left to move.
    pub fn restart(&mut self, computer_first: bool) -> Result<CommandStatus, NimError> {
        let deal = self.rng.state();
        debug!(seed = deal.seed, word_pos = %deal.word_pos, "dealing");
        let piles = PileSet::generate(&self.config, &mut self.rng);
        self.deal = Some(deal);
        let result = self
            .state
            .restart(piles, computer_first, self.strategy.as_ref())
            .map(|opening| CommandStatus::Restarted { opening });
        Self::into_status(result)
    }

    /// Toggle an item in the current player's selection.
    pub fn select(&mut self, pile: usize, ordinal: u32) -> Result<CommandStatus, NimError> {
        Self::into_status(self.state.toggle_item(pile, ordinal).map(CommandStatus::Selection))
    }

    /// Confirm the pending selection as a move.
    pub fn confirm(&mut self) -> Result<CommandStatus, NimError> {
        Self::into_status(self.state.confirm_move().map(CommandStatus::Moved))
    }

    /// Let the computer play Player2's move.
    pub fn request_computer_move(&mut self) -> Result<CommandStatus, NimError> {
        let result = self
            .state
            .computer_move(self.strategy.as_ref())
            .map(CommandStatus::Moved);
        Self::into_status(result)
    }

    /// Switch who controls Player2 for the rest of this and later games.
    pub fn set_opponent(&mut self, opponent: Opponent) {
        self.config.opponent = opponent;
        self.state.set_opponent(opponent);
    }

    fn seeded_rng(config: &NimConfig) -> GameRng {
        match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }

    fn into_status(result: Result<CommandStatus, NimError>) -> Result<CommandStatus, NimError> {
        match result {
            Ok(status) => Ok(status),
            Err(NimError::NotApplicable(reason)) => Ok(CommandStatus::NotApplicable(reason)),
            Err(err) if err.is_recoverable() => Ok(CommandStatus::Rejected(err)),
            Err(err) => {
                error!(%err, "engine invariant violated");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, Player, TurnOutcome};

    fn controller(counts: &[u32]) -> GameController {
        GameController::from_piles(
            PileSet::from_counts(counts.to_vec()),
            NimConfig::default().with_seed(42),
        )
        .unwrap()
    }

    /// Strategy that always proposes an impossible move.
    struct BrokenStrategy;

    impl MoveStrategy for BrokenStrategy {
        fn choose_move(&self, piles: &PileSet) -> Result<Move, NimError> {
            Ok(Move::new(piles.len(), 1))
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = GameController::new(NimConfig::default().with_counts(0, 3));
        assert!(matches!(result, Err(NimError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_deals_within_bounds() {
        let game = GameController::new(NimConfig::default().with_seed(1)).unwrap();
        let view = game.snapshot();

        assert!((3..=4).contains(&view.piles.len()));
        assert!(view.piles.iter().all(|c| (1..=7).contains(c)));
        assert_eq!(view.current_player, Player::Player1);
        assert_eq!(game.seed(), 1);
    }

    #[test]
    fn test_from_piles_refuses_empty_table() {
        for counts in [vec![0, 0, 0], Vec::new()] {
            let result = GameController::from_piles(
                PileSet::from_counts(counts),
                NimConfig::default().with_seed(42),
            );
            assert!(matches!(result, Err(NimError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_from_deal_replays_piles() {
        let mut game = GameController::new(NimConfig::default().with_seed(8)).unwrap();
        game.restart(false).unwrap();
        game.restart(false).unwrap();
        let deal = game.deal_state().unwrap().clone();

        let json = serde_json::to_string(&deal).unwrap();
        let stored: GameRngState = serde_json::from_str(&json).unwrap();
        let mut replay = GameController::from_deal(NimConfig::default(), &stored).unwrap();

        assert_eq!(replay.snapshot().piles, game.snapshot().piles);
        assert_eq!(replay.deal_state(), Some(&deal));
        assert_eq!(replay.seed(), 8);

        game.restart(false).unwrap();
        replay.restart(false).unwrap();
        assert_eq!(replay.snapshot().piles, game.snapshot().piles);
    }

    #[test]
    fn test_fixed_piles_have_no_deal() {
        let mut game = controller(&[1, 2]);
        assert_eq!(game.deal_state(), None);

        game.restart(false).unwrap();
        let deal = game.deal_state().unwrap();
        assert_eq!(deal.seed, 42);
        assert_eq!(deal.word_pos, 0);
    }

    #[test]
    fn test_confirm_empty_is_not_applicable() {
        let mut game = controller(&[1, 2, 3]);
        assert_eq!(
            game.confirm(),
            Ok(CommandStatus::NotApplicable(NotApplicableReason::EmptySelection))
        );
    }

    #[test]
    fn test_computer_move_out_of_turn_is_not_applicable() {
        let mut game = controller(&[1, 2, 3]);
        assert_eq!(
            game.request_computer_move(),
            Ok(CommandStatus::NotApplicable(NotApplicableReason::NotComputerTurn))
        );
    }

    #[test]
    fn test_select_missing_item_is_rejected() {
        let mut game = controller(&[1, 2, 3]);
        let status = game.select(0, 1).unwrap();

        assert_eq!(
            status,
            CommandStatus::Rejected(NimError::InvalidSelection { pile: 0, ordinal: 1 })
        );
        assert!(!status.is_applied());
        assert!(game.snapshot().selection.is_empty());
    }

    #[test]
    fn test_full_exchange() {
        let mut game = controller(&[3, 4, 5]);

        game.select(2, 0).unwrap();
        let status = game.confirm().unwrap();
        assert!(status.is_applied());
        assert!(game.is_computer_turn());

        // [3, 4, 4] has nim-sum 3: pile 0 goes from 3 to 0
        let status = game.request_computer_move().unwrap();
        let report = status.move_report().unwrap();
        assert_eq!(report.applied.mv, Move::new(0, 3));
        assert_eq!(report.outcome, TurnOutcome::NextTurn(Player::Player1));
        assert_eq!(game.nim_sum(), 0);
        assert_eq!(game.snapshot().piles, vec![0, 4, 4]);
    }

    #[test]
    fn test_restart_computer_first_returns_to_player1() {
        let mut game = controller(&[1]);
        let status = game.restart(true).unwrap();

        let opening = status.move_report().expect("computer opened");
        assert_eq!(opening.applied.player, Player::Player2);
        let view = game.snapshot();
        assert_eq!(view.current_player, Player::Player1);
        assert_eq!(view.phase, Phase::AwaitingSelection);
    }

    #[test]
    fn test_restart_is_deterministic_per_seed() {
        let mut a = GameController::new(NimConfig::default().with_seed(99)).unwrap();
        let mut b = GameController::new(NimConfig::default().with_seed(99)).unwrap();

        for _ in 0..5 {
            a.restart(false).unwrap();
            b.restart(false).unwrap();
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn test_hint() {
        let game = controller(&[3, 4, 5]);
        assert_eq!(game.hint(), Ok(Some(Move::new(0, 2))));

        let mut finished = controller(&[1]);
        finished.select(0, 0).unwrap();
        finished.confirm().unwrap();
        assert_eq!(finished.hint(), Ok(None));
    }

    #[test]
    fn test_set_opponent_human() {
        let mut game = controller(&[2, 2]);
        game.set_opponent(Opponent::Human);
        game.select(0, 0).unwrap();
        game.confirm().unwrap();

        assert!(!game.is_computer_turn());
        assert!(game.select(1, 0).unwrap().is_applied());
        assert_eq!(game.config().opponent, Opponent::Human);
    }

    #[test]
    fn test_broken_strategy_is_fatal() {
        let mut game = controller(&[2, 2]).with_strategy(BrokenStrategy);
        game.select(0, 0).unwrap();
        game.confirm().unwrap();

        let err = game.request_computer_move().unwrap_err();
        assert!(matches!(err, NimError::InternalInvariantViolation(_)));
        assert_eq!(game.snapshot().piles, vec![1, 2]);
    }
}

//! Move-decision strategies
//!
//! Every player implements [`Strategy`]. The automated players form the closed
//! set [`StrategyKind`]; interactive players live with their I/O elsewhere and
//! implement the trait directly.

mod furthest_back;
mod look_ahead;
mod mostly_smart;
mod random;

pub use furthest_back::FurthestBack;
pub use look_ahead::LookAhead;
pub use mostly_smart::MostlySmart;
pub use random::RandomMover;

use crate::error::GameError;
use crate::turn::{OpponentActivity, Turn};

/// A player's move-decision policy
pub trait Strategy {
    fn name(&self) -> &str;

    fn difficulty(&self) -> &'static str;

    /// Decide and play this turn's moves through [`Turn::apply`]
    ///
    /// Errors returned here reach the orchestrator, which abandons the rest
    /// of the turn.
    fn play_turn(&mut self, turn: &mut Turn<'_>, activity: &OpponentActivity) -> Result<(), GameError>;

    /// Called before the first turn of every game
    fn new_game(&mut self) {}

    /// Called on the losing side once the game has ended
    fn game_over(&mut self, _activity: &OpponentActivity) {}
}

/// Automated players
#[derive(Clone, Debug)]
pub enum StrategyKind {
    FurthestBack(FurthestBack),
    Random(RandomMover),
    LookAhead(LookAhead),
    MostlySmart(MostlySmart),
}

impl StrategyKind {
    pub fn furthest_back() -> Self {
        StrategyKind::FurthestBack(FurthestBack::default())
    }

    pub fn random(seed: u64) -> Self {
        StrategyKind::Random(RandomMover::with_seed(seed))
    }

    pub fn look_ahead() -> Self {
        StrategyKind::LookAhead(LookAhead::new(FurthestBack::default()))
    }

    /// Furthest-back play with one random turn somewhere in the first 20
    pub fn mostly_smart(seed: u64) -> Self {
        StrategyKind::MostlySmart(MostlySmart::with_seed(Self::furthest_back(), seed))
    }

    /// Reset every random source, so a game can be replayed exactly
    pub fn reseed(&mut self, seed: u64) {
        match self {
            StrategyKind::FurthestBack(_) | StrategyKind::LookAhead(_) => {}
            StrategyKind::Random(s) => s.reseed(seed),
            StrategyKind::MostlySmart(s) => s.reseed(seed),
        }
    }

    fn inner(&self) -> &dyn Strategy {
        match self {
            StrategyKind::FurthestBack(s) => s,
            StrategyKind::Random(s) => s,
            StrategyKind::LookAhead(s) => s,
            StrategyKind::MostlySmart(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Strategy {
        match self {
            StrategyKind::FurthestBack(s) => s,
            StrategyKind::Random(s) => s,
            StrategyKind::LookAhead(s) => s,
            StrategyKind::MostlySmart(s) => s,
        }
    }
}

impl Strategy for StrategyKind {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn difficulty(&self) -> &'static str {
        self.inner().difficulty()
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, activity: &OpponentActivity) -> Result<(), GameError> {
        self.inner_mut().play_turn(turn, activity)
    }

    fn new_game(&mut self) {
        self.inner_mut().new_game()
    }

    fn game_over(&mut self, activity: &OpponentActivity) {
        self.inner_mut().game_over(activity)
    }
}

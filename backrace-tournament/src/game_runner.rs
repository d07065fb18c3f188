//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use backrace_core::{Colour, Game, GameConfig, GameOutcome, StrategyKind};

/// Plays games between two strategies with an advancing seed
pub struct GameRunner {
    white: StrategyKind,
    black: StrategyKind,
    max_turns: u32,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a runner; strategies are cloned so each runner has its own state
    pub fn new(white: &StrategyKind, black: &StrategyKind, seed: u64) -> Self {
        Self {
            white: white.clone(),
            black: black.clone(),
            max_turns: GameConfig::default().max_turns,
            seed_counter: seed,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Play a single game, returning the outcome
    ///
    /// The dice and both strategies are reseeded from the counter, so a
    /// runner created with the same seed replays the same game.
    pub fn play_game(&mut self, first_player: Colour) -> GameOutcome {
        let seed = self.next_seed();
        self.white.reseed(seed.wrapping_mul(2).wrapping_add(1));
        self.black.reseed(seed.wrapping_mul(2).wrapping_add(2));

        let config = GameConfig::default()
            .with_seed(seed)
            .with_max_turns(self.max_turns);
        let mut game = Game::new(first_player, config);
        game.run(&mut self.white, &mut self.black)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}

//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

/// Match configuration
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Number of games (should be even for first-player alternation)
    pub games: usize,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game `i` uses `seed + i` (None = 42)
    pub seed: Option<u64>,
    /// Turn limit per game
    pub max_turns: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            parallel: true,
            seed: None,
            max_turns: 10_000,
        }
    }
}

impl MatchConfig {
    /// Create config for the given number of games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub(crate) fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}

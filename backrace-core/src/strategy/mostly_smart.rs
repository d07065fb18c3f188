//! Decorator that swaps in one random turn per game

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::GameError;
use crate::turn::{OpponentActivity, Turn};

use super::{RandomMover, Strategy, StrategyKind};

/// Default window of turns in which the random turn may fall
pub const DEFAULT_RANDOM_TURNS: RangeInclusive<u32> = 0..=20;

/// Plays like its base strategy except on one randomly chosen turn, where it
/// moves at random instead
#[derive(Clone, Debug)]
pub struct MostlySmart {
    base: Box<StrategyKind>,
    random: RandomMover,
    rng: ChaCha8Rng,
    random_turns: RangeInclusive<u32>,
    random_turn: u32,
    turn_counter: u32,
    random_move_done: bool,
}

impl MostlySmart {
    pub fn new(base: StrategyKind, random_turns: RangeInclusive<u32>, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let random_turn = rng.gen_range(random_turns.clone());
        Self {
            base: Box::new(base),
            random: RandomMover::with_seed(seed.wrapping_add(1)),
            rng,
            random_turns,
            random_turn,
            turn_counter: 0,
            random_move_done: false,
        }
    }

    pub fn with_seed(base: StrategyKind, seed: u64) -> Self {
        Self::new(base, DEFAULT_RANDOM_TURNS, seed)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.random.reseed(seed.wrapping_add(1));
        self.base.reseed(seed.wrapping_add(2));
        self.random_turn = self.rng.gen_range(self.random_turns.clone());
        self.turn_counter = 0;
        self.random_move_done = false;
    }

    /// Turn (1-based) on which the random policy plays; 0 means never
    pub fn random_turn(&self) -> u32 {
        self.random_turn
    }
}

impl Strategy for MostlySmart {
    fn name(&self) -> &str {
        "mostly-smart"
    }

    fn difficulty(&self) -> &'static str {
        "Medium+Random"
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, activity: &OpponentActivity) -> Result<(), GameError> {
        self.turn_counter += 1;
        if !self.random_move_done && self.turn_counter == self.random_turn {
            debug!(turn = self.turn_counter, "random turn");
            self.random_move_done = true;
            self.random.play_turn(turn, activity)
        } else {
            self.base.play_turn(turn, activity)
        }
    }

    fn new_game(&mut self) {
        if self.turn_counter > 0 {
            self.random_turn = self.rng.gen_range(self.random_turns.clone());
        }
        self.turn_counter = 0;
        self.random_move_done = false;
        self.base.new_game();
    }

    fn game_over(&mut self, activity: &OpponentActivity) {
        self.base.game_over(activity)
    }
}

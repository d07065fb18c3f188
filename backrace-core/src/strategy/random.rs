//! Uniformly random player

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GameError;
use crate::piece::{Location, Piece};
use crate::turn::{OpponentActivity, Turn};

use super::Strategy;

/// For each die, moves a randomly chosen piece that can legally use it
#[derive(Clone, Debug)]
pub struct RandomMover {
    rng: ChaCha8Rng,
}

impl RandomMover {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn pick(&mut self, turn: &Turn<'_>, die: u8) -> Option<Location> {
        let view = turn.view();
        let mut pieces: Vec<Piece> = view.pieces(turn.colour()).copied().collect();
        pieces.shuffle(&mut self.rng);
        pieces
            .into_iter()
            .find(|piece| view.is_move_possible(piece, die))
            .map(|piece| piece.location)
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Strategy for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    fn difficulty(&self) -> &'static str {
        "Easy"
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, _activity: &OpponentActivity) -> Result<(), GameError> {
        let dice = turn.remaining_dice().to_vec();
        for die in dice {
            if let Some(location) = self.pick(turn, die) {
                turn.apply(location, die)?;
            }
        }
        Ok(())
    }
}

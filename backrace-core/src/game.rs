//! Turn orchestration: dice, alternation and win detection

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Board;
use crate::colour::Colour;
use crate::dice::DiceRoll;
use crate::strategy::Strategy;
use crate::turn::{MoveRecord, OpponentActivity, Turn};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Game configuration
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Turns (both colours counted) before the game is abandoned
    pub max_turns: u32,
    /// Dice seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: 10_000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    /// Turn limit reached
    Undecided,
}

impl GameResult {
    fn from_winner(winner: Colour) -> Self {
        match winner {
            Colour::White => GameResult::WhiteWins,
            Colour::Black => GameResult::BlackWins,
        }
    }
}

/// Outcome of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Turns played by both colours together
    pub turns: u32,
    pub first_player: Colour,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Colour> {
        match self.result {
            GameResult::WhiteWins => Some(Colour::White),
            GameResult::BlackWins => Some(Colour::Black),
            GameResult::Undecided => None,
        }
    }
}

// ============================================================================
// GAME
// ============================================================================

/// One game on an authoritative board
pub struct Game {
    board: Board,
    first_player: Colour,
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl Game {
    pub fn new(first_player: Colour, config: GameConfig) -> Self {
        Self::from_board(Board::starting(), first_player, config)
    }

    /// Start from an arbitrary position
    pub fn from_board(board: Board, first_player: Colour, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            board,
            first_player,
            config,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first_player(&self) -> Colour {
        self.first_player
    }

    /// Play to completion
    pub fn run(&mut self, white: &mut dyn Strategy, black: &mut dyn Strategy) -> GameOutcome {
        self.run_with(white, black, |_, _, _| {})
    }

    /// Play to completion, reporting every finished turn
    pub fn run_with<F>(&mut self, white: &mut dyn Strategy, black: &mut dyn Strategy, mut on_turn: F) -> GameOutcome
    where
        F: FnMut(Colour, &DiceRoll, &Board),
    {
        white.new_game();
        black.new_game();

        let mut colour = self.first_player;
        let mut previous_roll: Vec<u8> = Vec::new();
        let mut last_moves: Vec<MoveRecord> = Vec::new();

        for turn_index in 0..self.config.max_turns {
            let dice = if turn_index == 0 {
                DiceRoll::opening(&mut self.rng)
            } else {
                DiceRoll::roll(&mut self.rng)
            };
            let predicted = DiceRoll::roll(&mut self.rng);

            let activity = OpponentActivity {
                dice_roll: std::mem::take(&mut previous_roll),
                opponents_moves: std::mem::take(&mut last_moves),
                next_opponent_roll: Some(predicted),
            };

            let strategy: &mut dyn Strategy = match colour {
                Colour::White => &mut *white,
                Colour::Black => &mut *black,
            };

            let mut turn = Turn::new(&mut self.board, colour, dice.clone());
            if let Err(e) = strategy.play_turn(&mut turn, &activity) {
                warn!(?colour, strategy = strategy.name(), "turn abandoned: {}", e);
            }
            last_moves = turn.into_moves();
            previous_roll = dice.values().to_vec();
            debug!(turn = turn_index + 1, ?colour, %dice, moves = last_moves.len(), "turn played");

            on_turn(colour, &dice, &self.board);

            if let Some(winner) = self.board.winner() {
                let loser: &mut dyn Strategy = match winner {
                    Colour::White => &mut *black,
                    Colour::Black => &mut *white,
                };
                loser.game_over(&OpponentActivity {
                    dice_roll: previous_roll,
                    opponents_moves: last_moves,
                    next_opponent_roll: None,
                });
                debug!(?winner, turns = turn_index + 1, "game over");
                return GameOutcome {
                    result: GameResult::from_winner(winner),
                    turns: turn_index + 1,
                    first_player: self.first_player,
                };
            }

            colour = colour.opponent();
        }

        warn!(max_turns = self.config.max_turns, "turn limit reached");
        GameOutcome {
            result: GameResult::Undecided,
            turns: self.config.max_turns,
            first_player: self.first_player,
        }
    }
}

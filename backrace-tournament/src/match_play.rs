//! Match play - many games between two strategies
//!
//! Level 2 - Phase-level implementation

use backrace_core::{Colour, GameOutcome, GameResult, Strategy, StrategyKind};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::MatchConfig;
use crate::game_runner::GameRunner;

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    /// Wins for the white strategy
    pub white_wins: u32,
    /// Wins for the black strategy
    pub black_wins: u32,
    /// Games abandoned at the turn limit
    pub undecided: u32,
    /// Total games played
    pub games_played: u32,
    /// Average game length in turns
    pub avg_turns: f32,
    /// Individual game outcomes
    pub outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            white_wins: 0,
            black_wins: 0,
            undecided: 0,
            games_played: 0,
            avg_turns: 0.0,
            outcomes: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_turns = if total_games > 0 {
            (self.avg_turns * self.games_played as f32 + other.avg_turns * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let mut outcomes = self.outcomes.clone();
        outcomes.extend(other.outcomes.iter().cloned());

        MatchResult {
            white_wins: self.white_wins + other.white_wins,
            black_wins: self.black_wins + other.black_wins,
            undecided: self.undecided + other.undecided,
            games_played: total_games,
            avg_turns,
            outcomes,
        }
    }

    pub fn white_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.white_wins as f32 / self.games_played as f32
        }
    }

    pub fn black_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.black_wins as f32 / self.games_played as f32
        }
    }

    /// Games the given colour moved first in
    pub fn started_by(&self, colour: Colour) -> usize {
        self.outcomes.iter().filter(|o| o.first_player == colour).count()
    }
}

/// Play a match between two strategies (Level 2 phase)
///
/// The starting colour alternates, White opening even-numbered games. Each
/// game gets its own clones of the strategies, seeded from the base seed and
/// the game index, so parallel and sequential runs agree.
pub fn play_match(white: &StrategyKind, black: &StrategyKind, config: &MatchConfig) -> MatchResult {
    play_match_with_progress(white, black, config, || {})
}

/// Like [`play_match`], calling `on_game` after every finished game
pub fn play_match_with_progress<F>(
    white: &StrategyKind,
    black: &StrategyKind,
    config: &MatchConfig,
    on_game: F,
) -> MatchResult
where
    F: Fn() + Sync,
{
    if config.games == 0 {
        return MatchResult::empty();
    }

    info!(
        white = white.name(),
        black = black.name(),
        games = config.games,
        parallel = config.parallel,
        "starting match"
    );

    let slots = prepare_game_slots(config.games);
    let outcomes: Vec<GameOutcome> = if config.parallel {
        slots
            .par_iter()
            .map(|slot| {
                let outcome = play_single_game(white, black, config, slot);
                on_game();
                outcome
            })
            .collect()
    } else {
        slots
            .iter()
            .map(|slot| {
                let outcome = play_single_game(white, black, config, slot);
                on_game();
                outcome
            })
            .collect()
    };

    let result = aggregate_results(outcomes);
    info!(
        white_wins = result.white_wins,
        black_wins = result.black_wins,
        undecided = result.undecided,
        "match finished"
    );
    result
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameSlot {
    first_player: Colour,
    /// Game index (for seeding)
    game_index: usize,
}

fn prepare_game_slots(games: usize) -> Vec<GameSlot> {
    (0..games)
        .map(|i| GameSlot {
            first_player: if i % 2 == 0 { Colour::White } else { Colour::Black },
            game_index: i,
        })
        .collect()
}

fn play_single_game(white: &StrategyKind, black: &StrategyKind, config: &MatchConfig, slot: &GameSlot) -> GameOutcome {
    let seed = config.base_seed().wrapping_add(slot.game_index as u64);
    let mut runner = GameRunner::new(white, black, seed).with_max_turns(config.max_turns);
    runner.play_game(slot.first_player)
}

/// Aggregate game outcomes into a match result
fn aggregate_results(outcomes: Vec<GameOutcome>) -> MatchResult {
    let mut white_wins = 0u32;
    let mut black_wins = 0u32;
    let mut undecided = 0u32;
    let mut total_turns = 0u64;

    for outcome in &outcomes {
        total_turns += outcome.turns as u64;
        match outcome.result {
            GameResult::WhiteWins => white_wins += 1,
            GameResult::BlackWins => black_wins += 1,
            GameResult::Undecided => undecided += 1,
        }
    }

    let games_played = outcomes.len() as u32;
    let avg_turns = if games_played > 0 {
        total_turns as f32 / games_played as f32
    } else {
        0.0
    };

    MatchResult {
        white_wins,
        black_wins,
        undecided,
        games_played,
        avg_turns,
        outcomes,
    }
}

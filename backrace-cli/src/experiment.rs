//! Experiment command - win-counting between two strategies
//!
//! ## Layers
//!
//! - Level 1: run() - orchestration
//! - Level 2: play(), report_results()
//! - Level 4: formatting utilities

use anyhow::{ensure, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use backrace_core::{GameResult, Strategy, StrategyKind};
use backrace_tournament::{play_match_with_progress, MatchConfig, MatchResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Automated strategy selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    FurthestBack,
    Random,
    LookAhead,
    MostlySmart,
}

impl StrategyChoice {
    pub fn build(self, seed: u64) -> StrategyKind {
        match self {
            StrategyChoice::FurthestBack => StrategyKind::furthest_back(),
            StrategyChoice::Random => StrategyKind::random(seed),
            StrategyChoice::LookAhead => StrategyKind::look_ahead(),
            StrategyChoice::MostlySmart => StrategyKind::mostly_smart(seed),
        }
    }
}

#[derive(Args)]
pub struct ExperimentArgs {
    /// Number of games to play (first player alternates)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Strategy playing White
    #[arg(long, value_enum, default_value = "furthest-back")]
    pub white: StrategyChoice,

    /// Strategy playing Black
    #[arg(long, value_enum, default_value = "random")]
    pub black: StrategyChoice,

    /// Base seed for dice and strategies
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn limit per game
    #[arg(long, default_value = "10000")]
    pub max_turns: u32,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run experiment command
pub fn run(args: ExperimentArgs) -> Result<()> {
    ensure!(args.games > 0, "--games must be at least 1");

    let seed = args.seed.unwrap_or_else(rand::random);
    let white = args.white.build(seed);
    let black = args.black.build(seed.wrapping_add(1));

    tracing::info!(
        "Starting experiment: {} ({}) vs {} ({}), {} games, seed={}",
        white.name(),
        white.difficulty(),
        black.name(),
        black.difficulty(),
        args.games,
        seed
    );

    let config = MatchConfig::new(args.games)
        .with_seed(seed)
        .with_parallel(!args.sequential)
        .with_max_turns(args.max_turns);
    let result = play(&white, &black, &config, !args.json)?;

    report_results(&result, &white, &black, seed, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play(white: &StrategyKind, black: &StrategyKind, config: &MatchConfig, show_progress: bool) -> Result<MatchResult> {
    let progress = if show_progress {
        let pb = ProgressBar::new(config.games as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = play_match_with_progress(white, black, config, || progress.inc(1));
    progress.finish_and_clear();
    Ok(result)
}

fn report_results(
    result: &MatchResult,
    white: &StrategyKind,
    black: &StrategyKind,
    seed: u64,
    json: bool,
) -> Result<()> {
    if json {
        let report = JsonReport::new(result, white, black, seed);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_text_results(result, white, black));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    timestamp: String,
    seed: u64,
    white: &'a str,
    black: &'a str,
    total_games: u32,
    white_wins: u32,
    black_wins: u32,
    undecided: u32,
    avg_turns: f32,
    white_win_rate: f32,
    black_win_rate: f32,
    games: Vec<JsonGame>,
}

#[derive(Serialize)]
struct JsonGame {
    game_number: usize,
    first_player: String,
    result: GameResult,
    turns: u32,
}

impl<'a> JsonReport<'a> {
    fn new(result: &MatchResult, white: &'a StrategyKind, black: &'a StrategyKind, seed: u64) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            seed,
            white: white.name(),
            black: black.name(),
            total_games: result.games_played,
            white_wins: result.white_wins,
            black_wins: result.black_wins,
            undecided: result.undecided,
            avg_turns: result.avg_turns,
            white_win_rate: result.white_win_rate(),
            black_win_rate: result.black_win_rate(),
            games: result
                .outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| JsonGame {
                    game_number: i + 1,
                    first_player: o.first_player.to_string(),
                    result: o.result,
                    turns: o.turns,
                })
                .collect(),
        }
    }
}

fn percent(count: u32, total: u32) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn format_text_results(result: &MatchResult, white: &StrategyKind, black: &StrategyKind) -> String {
    let total = result.games_played;
    let mut out = String::new();
    out.push_str("\n=== Experiment Results ===\n");
    out.push_str(&format!("Total games: {}\n", total));
    out.push_str(&format!(
        "White wins:  {} ({:.1}%)  [{}, {}]\n",
        result.white_wins,
        percent(result.white_wins, total),
        white.name(),
        white.difficulty()
    ));
    out.push_str(&format!(
        "Black wins:  {} ({:.1}%)  [{}, {}]\n",
        result.black_wins,
        percent(result.black_wins, total),
        black.name(),
        black.difficulty()
    ));
    if result.undecided > 0 {
        out.push_str(&format!(
            "Undecided:   {} ({:.1}%)\n",
            result.undecided,
            percent(result.undecided, total)
        ));
    }
    out.push_str(&format!("Avg turns:   {:.1}\n", result.avg_turns));
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use backrace_core::{Colour, GameOutcome};

    fn sample_result() -> MatchResult {
        let outcomes = vec![
            GameOutcome {
                result: GameResult::WhiteWins,
                turns: 40,
                first_player: Colour::White,
            },
            GameOutcome {
                result: GameResult::BlackWins,
                turns: 60,
                first_player: Colour::Black,
            },
        ];
        MatchResult {
            white_wins: 1,
            black_wins: 1,
            undecided: 0,
            games_played: 2,
            avg_turns: 50.0,
            outcomes,
        }
    }

    #[test]
    fn test_strategy_choice_builds_matching_kind() {
        assert_eq!(StrategyChoice::FurthestBack.build(0).name(), "furthest-back");
        assert_eq!(StrategyChoice::Random.build(0).name(), "random");
        assert_eq!(StrategyChoice::LookAhead.build(0).name(), "look-ahead");
        assert_eq!(StrategyChoice::MostlySmart.build(0).name(), "mostly-smart");
    }

    #[test]
    fn test_strategy_choice_parses_kebab_case() {
        assert_eq!(
            StrategyChoice::from_str("look-ahead", false),
            Ok(StrategyChoice::LookAhead)
        );
        assert!(StrategyChoice::from_str("alpha-beta", false).is_err());
    }

    #[test]
    fn test_text_report() {
        let text = format_text_results(&sample_result(), &StrategyKind::furthest_back(), &StrategyKind::random(1));
        assert!(text.contains("Total games: 2"));
        assert!(text.contains("White wins:  1 (50.0%)  [furthest-back, Medium]"));
        assert!(text.contains("Black wins:  1 (50.0%)  [random, Easy]"));
        assert!(!text.contains("Undecided"));
        assert!(text.contains("Avg turns:   50.0"));
    }

    #[test]
    fn test_json_report() {
        let white = StrategyKind::furthest_back();
        let black = StrategyKind::look_ahead();
        let report = JsonReport::new(&sample_result(), &white, &black, 7);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["white"], "furthest-back");
        assert_eq!(value["black"], "look-ahead");
        assert_eq!(value["total_games"], 2);
        assert_eq!(value["games"][1]["first_player"], "Black");
        assert_eq!(value["games"][1]["result"], "BlackWins");
    }

    #[test]
    fn test_play_small_match() {
        let config = MatchConfig::new(2).with_seed(5).with_parallel(false);
        let result = play(&StrategyKind::furthest_back(), &StrategyKind::random(5), &config, false).unwrap();
        assert_eq!(result.games_played, 2);
    }
}

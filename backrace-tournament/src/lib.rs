//! Backrace Tournament - strategy comparison through repeated play
//!
//! This crate provides match infrastructure:
//! - Single games between two automated strategies
//! - Matches that alternate the starting colour and tally wins
//! - Optional parallel execution with rayon
//!
//! ## Layers
//!
//! - Level 2: play_match (phases)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::MatchConfig;
pub use game_runner::GameRunner;
pub use match_play::{play_match, play_match_with_progress, MatchResult};

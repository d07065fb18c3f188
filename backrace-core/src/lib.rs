//! Backrace Core - Rules engine and heuristic players
//!
//! This crate provides the core game logic for a backgammon-style race game:
//! - Board state, legality rules and mutation (bar re-entry, blocking, bear-off, capture)
//! - Compound move resolution across several dice
//! - Position evaluation heuristic
//! - Recursive best-move search and the strategies built on top of it
//! - Turn orchestration (dice, alternation, win detection)

pub mod colour;
pub mod piece;
pub mod dice;
pub mod error;
pub mod board;
pub mod resolver;
pub mod eval;
pub mod search;
pub mod turn;
pub mod strategy;
pub mod game;

// Re-exports for convenient access
pub use colour::Colour;
pub use piece::{Location, Piece, PieceId, BLACK_BAR, WHITE_BAR};
pub use dice::DiceRoll;
pub use error::GameError;
pub use board::{Board, BoardSnapshot, Destination, PointSnapshot};
pub use resolver::{resolve_move, MoveSequence, MoveStep};
pub use eval::{assess_board, evaluate, evaluate_with, BoardStats, EvalWeights};
pub use search::{plan_turn, search_best_moves, PlannedMove, SearchResult, NO_SOLUTION};
pub use turn::{BoardView, MoveRecord, OpponentActivity, Turn};
pub use strategy::{FurthestBack, LookAhead, MostlySmart, RandomMover, Strategy, StrategyKind};
pub use game::{Game, GameConfig, GameOutcome, GameResult};

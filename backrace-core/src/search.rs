//! Recursive best-move search
//!
//! Each remaining die is assigned to one of the colour's occupied locations,
//! the move is played on a private copy of the board, and the rest of the dice
//! are searched from there. Positions are scored with [`crate::eval`]; the
//! lowest score wins.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::colour::Colour;
use crate::eval::{evaluate_with, EvalWeights};
use crate::piece::{Location, Piece};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a branch that found no playable move
pub const NO_SOLUTION: f32 = f32::INFINITY;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// A die to play from a location
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlannedMove {
    pub location: Location,
    pub die: u8,
}

/// Best sequence found and the score of the position it leads to
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub score: f32,
    pub moves: Vec<PlannedMove>,
}

impl SearchResult {
    pub fn none() -> Self {
        Self {
            score: NO_SOLUTION,
            moves: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

// ============================================================================
// TURN PLANNING
// ============================================================================

/// Plan a whole turn, trying both orders of a non-double roll
///
/// The reversed order only replaces the given one when it scores strictly
/// better without playing fewer dice.
pub fn plan_turn(board: &Board, colour: Colour, dice: &[u8], weights: &EvalWeights) -> SearchResult {
    let mut result = search_best_moves(board, colour, dice, weights);

    if dice.len() == 2 {
        let swapped: Vec<u8> = dice.iter().rev().copied().collect();
        let swapped_result = search_best_moves(board, colour, &swapped, weights);
        if swapped_result.score < result.score && swapped_result.moves.len() >= result.moves.len() {
            result = swapped_result;
        }
    }

    trace!(?colour, ?dice, score = result.score, moves = result.moves.len(), "planned turn");
    result
}

// ============================================================================
// RECURSIVE SEARCH
// ============================================================================

/// Search the dice in the given order
pub fn search_best_moves(board: &Board, colour: Colour, dice: &[u8], weights: &EvalWeights) -> SearchResult {
    let (&die, remaining) = match dice.split_first() {
        Some(split) => split,
        None => return SearchResult::none(),
    };

    let mut best_score = NO_SOLUTION;
    let mut best_moves: Vec<PlannedMove> = Vec::new();

    for piece in candidate_pieces(board, colour) {
        let Some(destination) = board.destination_for(&piece, die) else {
            continue;
        };
        // Bearing off lands on no point, whatever sits on the opposing bar
        if let Some(target) = destination.point() {
            if !is_point_safe(board, target, colour) {
                continue;
            }
        }

        let mut next = board.create_copy();
        let Some(moving) = next.piece_at(piece.location).copied() else {
            continue;
        };
        if next.move_piece(&moving, die).is_err() {
            continue;
        }
        let mv = PlannedMove {
            location: piece.location,
            die,
        };

        let follow_up = if remaining.is_empty() {
            SearchResult::none()
        } else {
            search_best_moves(&next, colour, remaining, weights)
        };

        if follow_up.is_empty() {
            // A one-move line never displaces a longer best-so-far
            let score = evaluate_with(&next, colour, weights);
            if score < best_score && best_moves.len() < 2 {
                best_score = score;
                best_moves = vec![mv];
            }
        } else if follow_up.score < best_score && follow_up.moves.len() + 1 >= best_moves.len() {
            best_score = follow_up.score;
            best_moves = Vec::with_capacity(follow_up.moves.len() + 1);
            best_moves.push(mv);
            best_moves.extend(follow_up.moves);
        }
    }

    SearchResult {
        score: best_score,
        moves: best_moves,
    }
}

/// One piece per occupied location, furthest from home first
fn candidate_pieces(board: &Board, colour: Colour) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = board
        .locations(colour)
        .into_iter()
        .filter_map(|loc| board.piece_at(loc).copied())
        .collect();
    pieces.sort_by(|a, b| b.spaces_to_home().cmp(&a.spaces_to_home()));
    pieces
}

/// Fewer than two opposing pieces on an on-board target
///
/// Already implied by legality; kept as an explicit filter.
fn is_point_safe(board: &Board, target: Location, colour: Colour) -> bool {
    board
        .pieces(colour.opponent())
        .filter(|p| p.location == target)
        .count()
        < 2
}

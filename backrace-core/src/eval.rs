//! Position evaluation
//!
//! Lower scores are better for the evaluated colour; the search minimises.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::colour::Colour;
use crate::piece::{HOME_BOARD_SIZE, BLACK_BAR};

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Penalty per pip the colour still has to travel
    pub distance: f32,
    /// Bonus per pip the opponent still has to travel
    pub opponent_distance: f32,
    /// Penalty per blot
    pub single: f32,
    /// Bonus per point held by two or more pieces
    pub safe_point: f32,
    /// Bonus per opponent piece on the bar
    pub taken: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            distance: 1.0,
            opponent_distance: 1.0 / 3.0,
            single: 2.0,
            safe_point: 1.0,
            taken: 1.0,
        }
    }
}

/// Raw statistics of a position from one colour's point of view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub number_occupied_spaces: u32,
    pub opponents_taken_pieces: u32,
    pub sum_distances: u32,
    pub sum_distances_opponent: u32,
    pub number_of_singles: u32,
    pub sum_single_distance_away_from_home: u32,
    pub pieces_on_board: u32,
    pub sum_distances_to_endzone: u32,
}

impl BoardStats {
    pub fn score(&self, weights: &EvalWeights) -> f32 {
        weights.distance * self.sum_distances as f32
            - weights.opponent_distance * self.sum_distances_opponent as f32
            + weights.single * self.number_of_singles as f32
            - weights.safe_point * self.number_occupied_spaces as f32
            - weights.taken * self.opponents_taken_pieces as f32
    }
}

/// Collect position statistics for `colour`
pub fn assess_board(board: &Board, colour: Colour) -> BoardStats {
    let mut stats = BoardStats::default();

    for piece in board.pieces(colour) {
        let spaces = piece.spaces_to_home() as u32;
        stats.pieces_on_board += 1;
        stats.sum_distances += spaces;
        stats.sum_distances_to_endzone += spaces.saturating_sub(HOME_BOARD_SIZE as u32);
    }

    // Bars are excluded: only points 1-24 count as singles or safe points
    let counts = board.counts(colour);
    for location in 1..BLACK_BAR as usize {
        match counts[location] {
            0 => {}
            1 => {
                stats.number_of_singles += 1;
                let spaces = match colour {
                    Colour::White => BLACK_BAR as u32 - location as u32,
                    Colour::Black => location as u32,
                };
                stats.sum_single_distance_away_from_home += BLACK_BAR as u32 - spaces;
            }
            _ => stats.number_occupied_spaces += 1,
        }
    }

    let opponent = colour.opponent();
    stats.opponents_taken_pieces = board.taken_pieces(opponent).count() as u32;
    stats.sum_distances_opponent = board
        .pieces(opponent)
        .map(|p| p.spaces_to_home() as u32)
        .sum();

    stats
}

/// Score with the default weights
pub fn evaluate(board: &Board, colour: Colour) -> f32 {
    evaluate_with(board, colour, &EvalWeights::default())
}

pub fn evaluate_with(board: &Board, colour: Colour, weights: &EvalWeights) -> f32 {
    assess_board(board, colour).score(weights)
}

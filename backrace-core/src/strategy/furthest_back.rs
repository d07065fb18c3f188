//! Heuristic player driven by the recursive search

use tracing::{debug, warn};

use crate::error::GameError;
use crate::eval::EvalWeights;
use crate::search::{plan_turn, PlannedMove};
use crate::turn::{OpponentActivity, Turn};

use super::Strategy;

/// Moves the pieces furthest from home first, choosing the dice assignment
/// whose resulting position scores lowest
#[derive(Clone, Debug, Default)]
pub struct FurthestBack {
    weights: EvalWeights,
}

impl FurthestBack {
    pub fn with_weights(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl Strategy for FurthestBack {
    fn name(&self) -> &str {
        "furthest-back"
    }

    fn difficulty(&self) -> &'static str {
        "Medium"
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, _activity: &OpponentActivity) -> Result<(), GameError> {
        let colour = turn.colour();
        let board = turn.view().create_copy();
        let plan = plan_turn(&board, colour, turn.remaining_dice(), &self.weights);
        debug!(?colour, score = plan.score, moves = ?plan.moves, "furthest-back plan");

        apply_plan(turn, &plan.moves);
        Ok(())
    }
}

/// Play planned moves in order, skipping any the turn rejects
///
/// Returns how many moves were played.
fn apply_plan(turn: &mut Turn<'_>, moves: &[PlannedMove]) -> usize {
    let colour = turn.colour();
    let mut played = 0;
    for mv in moves {
        match turn.apply(mv.location, mv.die) {
            Ok(_) => played += 1,
            Err(e) => warn!(?colour, location = mv.location, die = mv.die, "skipping planned move: {}", e),
        }
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::colour::Colour;
    use crate::board::Destination;
    use crate::dice::DiceRoll;

    #[test]
    fn test_plays_whole_roll() {
        let mut board = Board::starting();
        let mut strategy = FurthestBack::default();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(6, 5).unwrap());
        strategy.play_turn(&mut turn, &OpponentActivity::default()).unwrap();
        assert!(turn.remaining_dice().is_empty());
        let moved: u32 = turn.moves().iter().map(|m| m.die as u32).sum();
        assert_eq!(moved, 11);
        drop(turn);
        assert_eq!(board.piece_count(Colour::White), 15);
        assert_eq!(board.piece_count(Colour::Black), 15);
    }

    #[test]
    fn test_no_legal_moves_is_quiet() {
        let mut board = Board::new();
        board.add_many_pieces(1, Colour::White, 0);
        board.add_many_pieces(2, Colour::Black, 3);
        board.add_many_pieces(2, Colour::Black, 5);
        let mut strategy = FurthestBack::default();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(3, 5).unwrap());
        assert!(strategy.play_turn(&mut turn, &OpponentActivity::default()).is_ok());
        assert!(turn.moves().is_empty());
        assert_eq!(turn.remaining_dice(), &[3, 5]);
    }

    #[test]
    fn test_rejected_move_skipped() {
        // 6 holds Black pieces, so the first move is refused and the second still played
        let mut board = Board::starting();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(3, 4).unwrap());
        let plan = [PlannedMove { location: 6, die: 3 }, PlannedMove { location: 1, die: 3 }];
        assert_eq!(apply_plan(&mut turn, &plan), 1);
        assert_eq!(turn.moves().len(), 1);
        assert_eq!(turn.moves()[0].start_location, 1);
        assert_eq!(turn.moves()[0].end, Destination::Point(4));
        assert_eq!(turn.remaining_dice(), &[4]);
        drop(turn);
        assert_eq!(board.count_at(6), 5);
        assert_eq!(board.count_at(4), 1);
    }

    #[test]
    fn test_custom_weights() {
        // Pure race: only pips matter
        let weights = EvalWeights {
            distance: 1.0,
            opponent_distance: 0.0,
            single: 0.0,
            safe_point: 0.0,
            taken: 0.0,
        };
        let mut strategy = FurthestBack::with_weights(weights.clone());
        assert_eq!(strategy.weights(), &weights);

        let mut board = Board::starting();
        let mut turn = Turn::new(&mut board, Colour::Black, DiceRoll::new(4, 2).unwrap());
        strategy.play_turn(&mut turn, &OpponentActivity::default()).unwrap();
        assert!(turn.remaining_dice().is_empty());
        let moved: u32 = turn.moves().iter().map(|m| m.die as u32).sum();
        assert_eq!(moved, 6);
    }
}

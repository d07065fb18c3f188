//! Blocking player that anticipates the opponent's next roll

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::board::Destination;
use crate::colour::Colour;
use crate::dice::DiceRoll;
use crate::error::GameError;
use crate::piece::{Location, Piece};
use crate::search::PlannedMove;
use crate::turn::{BoardView, OpponentActivity, Turn};

use super::{FurthestBack, Strategy};

/// Occupies a point the opponent could reach with its predicted roll, then
/// stops; otherwise plays like [`FurthestBack`]
#[derive(Clone, Debug, Default)]
pub struct LookAhead {
    fallback: FurthestBack,
}

impl LookAhead {
    pub fn new(fallback: FurthestBack) -> Self {
        Self { fallback }
    }
}

/// Points the opponent could land on with any value of `predicted`
fn opponent_reach(view: &BoardView<'_>, opponent: Colour, predicted: &DiceRoll) -> FxHashSet<Location> {
    let dice = predicted.distinct_descending();
    let mut reach = FxHashSet::default();
    for location in view.locations(opponent) {
        if let Some(piece) = view.piece_at(location) {
            for &die in &dice {
                if let Some(Destination::Point(target)) = view.destination_for(piece, die) {
                    reach.insert(target);
                }
            }
        }
    }
    reach
}

/// First single move onto a predicted opponent landing point that leaves no
/// opposing blot underneath
fn blocking_move(
    view: &BoardView<'_>,
    colour: Colour,
    dice: &[u8],
    predicted: &DiceRoll,
) -> Option<PlannedMove> {
    let reach = opponent_reach(view, colour.opponent(), predicted);
    if reach.is_empty() {
        return None;
    }

    let mut own_dice = dice.to_vec();
    own_dice.sort_unstable_by(|a, b| b.cmp(a));
    own_dice.dedup();

    let mut pieces: Vec<Piece> = view
        .locations(colour)
        .into_iter()
        .filter_map(|loc| view.piece_at(loc).copied())
        .collect();
    pieces.sort_by(|a, b| b.spaces_to_home().cmp(&a.spaces_to_home()));

    for piece in &pieces {
        for &die in &own_dice {
            let Some(Destination::Point(target)) = view.destination_for(piece, die) else {
                continue;
            };
            let safe_landing = match view.owner_at(target) {
                None => true,
                Some(owner) => owner == colour,
            };
            if reach.contains(&target) && safe_landing {
                return Some(PlannedMove {
                    location: piece.location,
                    die,
                });
            }
        }
    }
    None
}

impl Strategy for LookAhead {
    fn name(&self) -> &str {
        "look-ahead"
    }

    fn difficulty(&self) -> &'static str {
        "Hard"
    }

    fn play_turn(&mut self, turn: &mut Turn<'_>, activity: &OpponentActivity) -> Result<(), GameError> {
        if let Some(predicted) = &activity.next_opponent_roll {
            let colour = turn.colour();
            let block = blocking_move(&turn.view(), colour, turn.remaining_dice(), predicted);
            if let Some(mv) = block {
                match turn.apply(mv.location, mv.die) {
                    Ok(_) => {
                        debug!(?colour, location = mv.location, die = mv.die, "blocking move");
                        return Ok(());
                    }
                    Err(e) => debug!(?colour, "blocking move rejected: {}", e),
                }
            }
        }
        self.fallback.play_turn(turn, activity)
    }

    fn new_game(&mut self) {
        self.fallback.new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn board_with(layout: &[(usize, Colour, Location)]) -> Board {
        let mut board = Board::new();
        for &(count, colour, location) in layout {
            board.add_many_pieces(count, colour, location);
        }
        board
    }

    fn activity(first: u8, second: u8) -> OpponentActivity {
        OpponentActivity {
            next_opponent_roll: Some(DiceRoll::new(first, second).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_opponent_reach() {
        let board = board_with(&[(2, Colour::Black, 20), (2, Colour::White, 16)]);
        let view = BoardView::new(&board);
        let reach = opponent_reach(&view, Colour::Black, &DiceRoll::new(1, 4).unwrap());
        assert!(reach.contains(&19));
        // 20 - 4 = 16 is White's point
        assert!(!reach.contains(&16));
        assert_eq!(reach.len(), 1);
    }

    #[test]
    fn test_blocks_predicted_landing() {
        // Black at 20 is predicted to roll 3: it would land on 17
        let mut board = board_with(&[(2, Colour::White, 12), (2, Colour::White, 14), (2, Colour::Black, 20)]);
        let mut strategy = LookAhead::default();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(5, 2).unwrap());
        strategy.play_turn(&mut turn, &activity(3, 6)).unwrap();
        assert_eq!(turn.moves().len(), 1);
        assert_eq!(turn.moves()[0].end, Destination::Point(17));
        assert_eq!(turn.remaining_dice().len(), 1);
    }

    #[test]
    fn test_never_lands_on_opposing_blot() {
        // 17 is reachable by Black but holds a Black blot, so blocking there would be a hit, not a block
        let board = board_with(&[(2, Colour::White, 12), (1, Colour::Black, 17), (2, Colour::Black, 20)]);
        let view = BoardView::new(&board);
        let mv = blocking_move(&view, Colour::White, &[5], &DiceRoll::new(3, 6).unwrap());
        assert_eq!(mv, None);
    }

    #[test]
    fn test_falls_back_without_prediction() {
        let mut board = Board::starting();
        let mut strategy = LookAhead::default();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(6, 5).unwrap());
        strategy.play_turn(&mut turn, &OpponentActivity::default()).unwrap();
        assert_eq!(turn.moves().len(), 2);
        assert!(turn.remaining_dice().is_empty());
    }

    #[test]
    fn test_falls_back_when_nothing_blocks() {
        let mut board = board_with(&[(2, Colour::White, 2), (2, Colour::Black, 23)]);
        let mut strategy = LookAhead::default();
        let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(1, 2).unwrap());
        strategy.play_turn(&mut turn, &activity(1, 2)).unwrap();
        assert_eq!(turn.moves().len(), 2);
    }
}

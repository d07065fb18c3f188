//! Compound move resolution
//!
//! A player may ask to move one piece a total distance that no single die
//! covers. The distance is realised by consuming dice one at a time, and every
//! intermediate stop has to be legal on its own.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Destination};
use crate::error::GameError;
use crate::piece::Location;

/// One die applied to one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    pub from: Location,
    pub die: u8,
    pub to: Destination,
}

/// Individual die usages realising one requested move, in application order
pub type MoveSequence = Vec<MoveStep>;

/// Decompose a requested distance into legal single-die steps
///
/// A distance equal to an available die is resolved with that die alone.
/// Otherwise the dice are consumed in their given order, or reversed when
/// the first die cannot be played, until the travelled distance matches.
/// The board is never modified; trial steps run on a copy.
pub fn resolve_move(
    board: &Board,
    location: Location,
    requested: u8,
    available: &[u8],
) -> Result<MoveSequence, GameError> {
    let not_possible = GameError::MoveNotPossible {
        location,
        requested,
    };
    let piece = board.piece_at(location).ok_or(not_possible.clone())?;

    if available.contains(&requested) {
        return match board.destination_for(piece, requested) {
            Some(to) => Ok(vec![MoveStep {
                from: location,
                die: requested,
                to,
            }]),
            None => Err(not_possible),
        };
    }
    if available.len() <= 1 {
        return Err(not_possible);
    }

    let mut scratch = board.create_copy();
    let mut order = available.to_vec();
    let opener = *scratch.piece_at(location).ok_or(not_possible.clone())?;
    if !scratch.is_move_possible(&opener, order[0]) {
        order.reverse();
    }

    let mut steps = Vec::with_capacity(order.len());
    let mut current = location;
    let mut travelled = 0u32;

    for die in order {
        let piece = match scratch.piece_at(current) {
            Some(piece) => *piece,
            None => break,
        };
        if !scratch.is_move_possible(&piece, die) {
            break;
        }
        let to = scratch.move_piece(&piece, die)?;
        steps.push(MoveStep {
            from: current,
            die,
            to,
        });
        travelled += die as u32;

        if travelled == requested as u32 {
            return Ok(steps);
        }
        match to {
            Destination::Point(next) => current = next,
            Destination::Off => break,
        }
    }

    Err(not_possible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;

    fn board_with(layout: &[(usize, Colour, Location)]) -> Board {
        let mut board = Board::new();
        for &(count, colour, location) in layout {
            board.add_many_pieces(count, colour, location);
        }
        board
    }

    #[test]
    fn test_single_die_match() {
        let board = Board::starting();
        let steps = resolve_move(&board, 1, 3, &[3, 4]).unwrap();
        assert_eq!(
            steps,
            vec![MoveStep {
                from: 1,
                die: 3,
                to: Destination::Point(4)
            }]
        );
    }

    #[test]
    fn test_single_die_blocked_fails() {
        let board = Board::starting();
        // 1 -> 6 is Black's point
        assert_eq!(
            resolve_move(&board, 1, 5, &[5, 2]),
            Err(GameError::MoveNotPossible {
                location: 1,
                requested: 5
            })
        );
    }

    #[test]
    fn test_compound_in_given_order() {
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 20)]);
        let steps = resolve_move(&board, 1, 7, &[3, 4]).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].die, 3);
        assert_eq!(steps[0].to, Destination::Point(4));
        assert_eq!(steps[1].die, 4);
        assert_eq!(steps[1].to, Destination::Point(8));
        // Original board untouched
        assert_eq!(board.count_at(1), 1);
        assert_eq!(board.count_at(8), 0);
    }

    #[test]
    fn test_compound_reverses_when_first_stop_blocked() {
        // Point 4 is blocked, point 5 is open: must play 4 then 3
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 4)]);
        let steps = resolve_move(&board, 1, 7, &[3, 4]).unwrap();
        assert_eq!(steps.iter().map(|s| s.die).collect::<Vec<_>>(), vec![4, 3]);
        assert_eq!(steps[1].to, Destination::Point(8));
    }

    #[test]
    fn test_compound_fails_when_both_stops_blocked() {
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 4), (2, Colour::Black, 5)]);
        assert!(resolve_move(&board, 1, 7, &[3, 4]).is_err());
    }

    #[test]
    fn test_compound_fails_when_final_point_blocked() {
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 8)]);
        assert!(resolve_move(&board, 1, 7, &[3, 4]).is_err());
    }

    #[test]
    fn test_double_partial_prefix() {
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 20)]);
        let steps = resolve_move(&board, 1, 6, &[2, 2, 2, 2]).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].to, Destination::Point(7));
    }

    #[test]
    fn test_last_die_must_match() {
        let board = Board::starting();
        assert!(resolve_move(&board, 1, 4, &[3]).is_err());
    }

    #[test]
    fn test_empty_location() {
        let board = Board::starting();
        assert!(resolve_move(&board, 2, 3, &[3, 4]).is_err());
    }

    #[test]
    fn test_unreachable_total() {
        let board = board_with(&[(1, Colour::White, 1), (2, Colour::Black, 20)]);
        assert!(resolve_move(&board, 1, 5, &[3, 4]).is_err());
    }
}

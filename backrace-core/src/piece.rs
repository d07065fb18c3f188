//! Pieces and board locations

use serde::{Deserialize, Serialize};

use crate::colour::Colour;

/// Board location: 0 = White bar, 1-24 = points, 25 = Black bar
pub type Location = u8;

/// Identity of a piece within its board
pub type PieceId = u32;

/// Identity of a board instance
pub type BoardId = u64;

pub const WHITE_BAR: Location = 0;
pub const BLACK_BAR: Location = 25;

/// Number of points a piece must clear before it can bear off
pub const HOME_BOARD_SIZE: u8 = 6;

/// A piece on the board
///
/// Pieces are identity-distinct even when stacked on the same point: two
/// pieces compare equal only if they carry the same id on the same board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    board: BoardId,
    pub colour: Colour,
    pub location: Location,
}

impl Piece {
    pub(crate) fn new(id: PieceId, board: BoardId, colour: Colour, location: Location) -> Self {
        Self {
            id,
            board,
            colour,
            location,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub(crate) fn board_id(&self) -> BoardId {
        self.board
    }

    pub(crate) fn rebind(&mut self, board: BoardId) {
        self.board = board;
    }

    /// Distance still to travel before this piece is borne off
    pub fn spaces_to_home(&self) -> u8 {
        match self.colour {
            Colour::White => BLACK_BAR - self.location,
            Colour::Black => self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_to_home() {
        assert_eq!(Piece::new(0, 1, Colour::White, 1).spaces_to_home(), 24);
        assert_eq!(Piece::new(0, 1, Colour::White, 19).spaces_to_home(), 6);
        assert_eq!(Piece::new(0, 1, Colour::Black, 6).spaces_to_home(), 6);
        assert_eq!(Piece::new(0, 1, Colour::Black, 24).spaces_to_home(), 24);
    }

    #[test]
    fn test_bar_is_furthest_from_home() {
        assert_eq!(Piece::new(0, 1, Colour::White, WHITE_BAR).spaces_to_home(), 25);
        assert_eq!(Piece::new(0, 1, Colour::Black, BLACK_BAR).spaces_to_home(), 25);
    }
}

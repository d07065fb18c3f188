//! Error taxonomy for the rules engine

use thiserror::Error;

use crate::piece::{Location, PieceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Board mutation refused by the legality rules
    #[error("you cannot move the piece at {location} by {die}")]
    IllegalMove { location: Location, die: u8 },

    /// Piece reference minted by a different board instance
    #[error("piece {piece} does not belong to this board")]
    ForeignPiece { piece: PieceId },

    #[error("the game has not finished yet")]
    GameNotOver,

    /// No legal decomposition of the requested distance into the remaining dice
    #[error("you cannot move the piece at {location} by {requested}")]
    MoveNotPossible { location: Location, requested: u8 },

    #[error("invalid dice roll: {0:?}")]
    InvalidDice(Vec<u8>),
}

impl GameError {
    /// Errors a caller can recover from by choosing another move
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. } | GameError::MoveNotPossible { .. }
        )
    }
}

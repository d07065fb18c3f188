//! Per-turn context handed to strategies
//!
//! Strategies never touch the authoritative board directly. They read it
//! through [`BoardView`] and change it only through [`Turn::apply`], which
//! owns the remaining dice and enforces the rules.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, BoardSnapshot, Destination};
use crate::colour::Colour;
use crate::dice::DiceRoll;
use crate::error::GameError;
use crate::piece::{Location, Piece};
use crate::resolver::resolve_move;

/// A single die applied during a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub start_location: Location,
    pub die: u8,
    pub end: Destination,
}

/// What the opponent did last and what they are predicted to roll next
#[derive(Clone, Debug, Default)]
pub struct OpponentActivity {
    /// The opponent's previous roll
    pub dice_roll: Vec<u8>,
    /// Moves the opponent played on their previous turn
    pub opponents_moves: Vec<MoveRecord>,
    /// Predicted next opponent roll, when the orchestrator supplies one
    pub next_opponent_roll: Option<DiceRoll>,
}

// ============================================================================
// READ-ONLY VIEW
// ============================================================================

/// Query-only facade over a board
#[derive(Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    pub fn pieces_at(&self, location: Location) -> impl Iterator<Item = &'a Piece> + 'a {
        self.board.pieces_at(location)
    }

    pub fn piece_at(&self, location: Location) -> Option<&'a Piece> {
        self.board.piece_at(location)
    }

    pub fn count_at(&self, location: Location) -> usize {
        self.board.count_at(location)
    }

    pub fn owner_at(&self, location: Location) -> Option<Colour> {
        self.board.owner_at(location)
    }

    pub fn pieces(&self, colour: Colour) -> impl Iterator<Item = &'a Piece> + 'a {
        self.board.pieces(colour)
    }

    pub fn locations(&self, colour: Colour) -> Vec<Location> {
        self.board.locations(colour)
    }

    pub fn taken_pieces(&self, colour: Colour) -> impl Iterator<Item = &'a Piece> + 'a {
        self.board.taken_pieces(colour)
    }

    pub fn is_move_possible(&self, piece: &Piece, die: u8) -> bool {
        self.board.is_move_possible(piece, die)
    }

    pub fn destination_for(&self, piece: &Piece, die: u8) -> Option<Destination> {
        self.board.destination_for(piece, die)
    }

    pub fn can_land_on(&self, colour: Colour, location: Location) -> bool {
        self.board.can_land_on(colour, location)
    }

    pub fn can_move_off(&self, colour: Colour) -> bool {
        self.board.can_move_off(colour)
    }

    pub fn no_moves_possible(&self, colour: Colour, dice: &[u8]) -> bool {
        self.board.no_moves_possible(colour, dice)
    }

    pub fn has_game_ended(&self) -> bool {
        self.board.has_game_ended()
    }

    pub fn who_won(&self) -> Result<Colour, GameError> {
        self.board.who_won()
    }

    /// Private copy for speculative play
    pub fn create_copy(&self) -> Board {
        self.board.create_copy()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }
}

// ============================================================================
// TURN
// ============================================================================

/// One colour's turn on the authoritative board
pub struct Turn<'a> {
    board: &'a mut Board,
    colour: Colour,
    dice: DiceRoll,
    moves: Vec<MoveRecord>,
}

impl<'a> Turn<'a> {
    pub fn new(board: &'a mut Board, colour: Colour, dice: DiceRoll) -> Self {
        Self {
            board,
            colour,
            dice,
            moves: Vec::new(),
        }
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(&*self.board)
    }

    pub fn remaining_dice(&self) -> &[u8] {
        self.dice.values()
    }

    pub fn is_finished(&self) -> bool {
        self.dice.is_empty() || self.board.has_game_ended()
    }

    /// Move the piece at `location` a total of `requested` spaces
    ///
    /// The distance may span several dice (see [`resolve_move`]). Returns the
    /// die values consumed, in the order they were played.
    pub fn apply(&mut self, location: Location, requested: u8) -> Result<Vec<u8>, GameError> {
        let not_possible = GameError::MoveNotPossible {
            location,
            requested,
        };
        if self.board.owner_at(location) != Some(self.colour) {
            return Err(not_possible);
        }

        let steps = resolve_move(&*self.board, location, requested, self.dice.values())?;
        let mut consumed = Vec::with_capacity(steps.len());

        for step in steps {
            let piece = *self.board.piece_at(step.from).ok_or(not_possible.clone())?;
            let end = self.board.move_piece(&piece, step.die)?;
            self.dice.remove(step.die);
            consumed.push(step.die);
            self.moves.push(MoveRecord {
                start_location: step.from,
                die: step.die,
                end,
            });
            debug!(colour = ?self.colour, from = step.from, die = step.die, ?end, "moved");
        }

        Ok(consumed)
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<MoveRecord> {
        self.moves
    }
}

//! Board state, legality rules and mutation

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::error::GameError;
use crate::piece::{BoardId, Location, Piece, PieceId, BLACK_BAR, HOME_BOARD_SIZE, WHITE_BAR};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Starting layout as (count, colour, location)
const STARTING_LAYOUT: [(usize, Colour, Location); 8] = [
    (2, Colour::White, 1),
    (5, Colour::Black, 6),
    (3, Colour::Black, 8),
    (5, Colour::White, 12),
    (5, Colour::Black, 13),
    (3, Colour::White, 17),
    (5, Colour::White, 19),
    (2, Colour::Black, 24),
];

/// Number of distinct locations including both bars
pub const LOCATIONS: usize = 26;

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

fn next_board_id() -> BoardId {
    NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Where a piece ends up after a single die is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Point(Location),
    Off,
}

impl Destination {
    pub fn point(self) -> Option<Location> {
        match self {
            Destination::Point(location) => Some(location),
            Destination::Off => None,
        }
    }
}

/// Contents of one occupied location
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub colour: Colour,
    pub count: usize,
}

/// Occupied locations only, keyed by location (0 and 25 are the bars)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(pub BTreeMap<Location, PointSnapshot>);

impl BoardSnapshot {
    pub fn get(&self, location: Location) -> Option<&PointSnapshot> {
        self.0.get(&location)
    }
}

/// Board (copy before speculative mutation)
///
/// Every board instance has its own identity; pieces handed out by one board
/// are rejected by another, including by its copies.
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    next_piece: PieceId,
    pieces: Vec<Piece>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board
    pub fn new() -> Self {
        Self {
            id: next_board_id(),
            next_piece: 0,
            pieces: Vec::new(),
        }
    }

    /// Standard starting layout, 15 pieces per colour
    pub fn starting() -> Self {
        let mut board = Self::new();
        for &(count, colour, location) in &STARTING_LAYOUT {
            board.add_many_pieces(count, colour, location);
        }
        board
    }

    pub fn add_many_pieces(&mut self, count: usize, colour: Colour, location: Location) {
        for _ in 0..count {
            let piece = Piece::new(self.next_piece, self.id, colour, location);
            self.next_piece += 1;
            self.pieces.push(piece);
        }
    }

    /// Independent deep copy with a fresh board identity
    pub fn create_copy(&self) -> Board {
        let id = next_board_id();
        let pieces = self
            .pieces
            .iter()
            .map(|piece| {
                let mut copy = *piece;
                copy.rebind(id);
                copy
            })
            .collect();
        Board {
            id,
            next_piece: self.next_piece,
            pieces,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn pieces_at(&self, location: Location) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.location == location)
    }

    /// First piece at a location
    pub fn piece_at(&self, location: Location) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.location == location)
    }

    pub fn count_at(&self, location: Location) -> usize {
        self.pieces_at(location).count()
    }

    /// Colour holding a location (locations never hold both colours)
    pub fn owner_at(&self, location: Location) -> Option<Colour> {
        self.piece_at(location).map(|p| p.colour)
    }

    pub fn pieces(&self, colour: Colour) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.colour == colour)
    }

    pub fn piece_count(&self, colour: Colour) -> usize {
        self.pieces(colour).count()
    }

    /// Distinct occupied locations of a colour, ascending
    pub fn locations(&self, colour: Colour) -> Vec<Location> {
        let counts = self.counts(colour);
        (0..LOCATIONS as Location)
            .filter(|&loc| counts[loc as usize] > 0)
            .collect()
    }

    /// Pieces of a colour waiting on its bar
    pub fn taken_pieces(&self, colour: Colour) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces_at(colour.bar_location())
    }

    /// Per-location piece counts for one colour
    pub fn counts(&self, colour: Colour) -> [u8; LOCATIONS] {
        let mut counts = [0u8; LOCATIONS];
        for piece in self.pieces(colour) {
            counts[piece.location as usize] += 1;
        }
        counts
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Raw target of a die applied to a piece, may fall off either edge
    fn target(piece: &Piece, die: u8) -> i16 {
        piece.location as i16 + die as i16 * piece.colour.direction()
    }

    /// Check whether `piece` may travel `die` spaces
    pub fn is_move_possible(&self, piece: &Piece, die: u8) -> bool {
        let bar = piece.colour.bar_location();
        if piece.location != bar && self.taken_pieces(piece.colour).next().is_some() {
            return false;
        }

        let target = Self::target(piece, die);
        if target <= WHITE_BAR as i16 || target >= BLACK_BAR as i16 {
            if !self.can_move_off(piece.colour) {
                return false;
            }
            if target != WHITE_BAR as i16 && target != BLACK_BAR as i16 {
                // Overshooting is only allowed once no piece needs this die exactly or more
                return !self.pieces(piece.colour).any(|p| p.spaces_to_home() >= die);
            }
            return true;
        }

        self.can_land_on(piece.colour, target as Location)
    }

    /// True if the location is empty, a single opposing blot, or held by `colour`
    pub fn can_land_on(&self, colour: Colour, location: Location) -> bool {
        let mut occupants = self.pieces_at(location);
        match (occupants.next(), occupants.next()) {
            (None, _) | (Some(_), None) => true,
            (Some(first), Some(_)) => first.colour == colour,
        }
    }

    /// Would-be destination of a move, or None if illegal
    pub fn destination_for(&self, piece: &Piece, die: u8) -> Option<Destination> {
        if !self.is_move_possible(piece, die) {
            return None;
        }
        let target = Self::target(piece, die);
        if target <= WHITE_BAR as i16 || target >= BLACK_BAR as i16 {
            Some(Destination::Off)
        } else {
            Some(Destination::Point(target as Location))
        }
    }

    /// All pieces of the colour are within the last six points of their path
    pub fn can_move_off(&self, colour: Colour) -> bool {
        self.pieces(colour).all(|p| p.spaces_to_home() <= HOME_BOARD_SIZE)
    }

    pub fn no_moves_possible(&self, colour: Colour, dice: &[u8]) -> bool {
        let mut distinct = dice.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        !self.locations(colour).into_iter().any(|loc| {
            self.piece_at(loc)
                .map(|piece| distinct.iter().any(|&die| self.is_move_possible(piece, die)))
                .unwrap_or(false)
        })
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Move a piece by one die, capturing a lone opposing piece or bearing off
    pub fn move_piece(&mut self, piece: &Piece, die: u8) -> Result<Destination, GameError> {
        let foreign = GameError::ForeignPiece { piece: piece.id() };
        if piece.board_id() != self.id {
            return Err(foreign);
        }
        let idx = self
            .pieces
            .iter()
            .position(|p| p.id() == piece.id())
            .ok_or(foreign)?;
        let current = self.pieces[idx];

        let destination = self
            .destination_for(&current, die)
            .ok_or(GameError::IllegalMove {
                location: current.location,
                die,
            })?;

        match destination {
            Destination::Off => {
                self.pieces.remove(idx);
            }
            Destination::Point(target) => {
                let occupants: Vec<usize> = self
                    .pieces
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.location == target)
                    .map(|(i, _)| i)
                    .collect();
                if let [victim] = occupants[..] {
                    let victim = &mut self.pieces[victim];
                    if victim.colour != current.colour {
                        victim.location = victim.colour.bar_location();
                    }
                }
                self.pieces[idx].location = target;
            }
        }

        Ok(destination)
    }

    // ========================================================================
    // TERMINAL STATE
    // ========================================================================

    pub fn has_game_ended(&self) -> bool {
        self.piece_count(Colour::White) == 0 || self.piece_count(Colour::Black) == 0
    }

    /// Winner, if one colour has borne off every piece
    pub fn winner(&self) -> Option<Colour> {
        if self.piece_count(Colour::White) == 0 {
            Some(Colour::White)
        } else if self.piece_count(Colour::Black) == 0 {
            Some(Colour::Black)
        } else {
            None
        }
    }

    pub fn who_won(&self) -> Result<Colour, GameError> {
        self.winner().ok_or(GameError::GameNotOver)
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    pub fn snapshot(&self) -> BoardSnapshot {
        let white = self.counts(Colour::White);
        let black = self.counts(Colour::Black);
        let mut points = BTreeMap::new();
        for loc in 0..LOCATIONS {
            let entry = if white[loc] > 0 {
                Some(PointSnapshot {
                    colour: Colour::White,
                    count: white[loc] as usize,
                })
            } else if black[loc] > 0 {
                Some(PointSnapshot {
                    colour: Colour::Black,
                    count: black[loc] as usize,
                })
            } else {
                None
            };
            if let Some(entry) = entry {
                points.insert(loc as Location, entry);
            }
        }
        BoardSnapshot(points)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Same as [`Board::create_copy`]: the clone gets a fresh identity, so pieces
/// taken from the original are rejected by the clone with
/// [`GameError::ForeignPiece`]. Look the piece up again on the clone first.
impl Clone for Board {
    fn clone(&self) -> Self {
        self.create_copy()
    }
}

//! Player colours and their orientation on the board

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Location, BLACK_BAR, WHITE_BAR};

/// Player colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White = 0,
    Black = 1,
}

impl Colour {
    pub fn opponent(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Sign of travel along point numbers (White climbs toward 25, Black descends toward 0)
    pub fn direction(self) -> i16 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Where captured pieces of this colour wait to re-enter
    pub fn bar_location(self) -> Location {
        match self {
            Colour::White => WHITE_BAR,
            Colour::Black => BLACK_BAR,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_round_trip() {
        assert_eq!(Colour::White.opponent(), Colour::Black);
        assert_eq!(Colour::Black.opponent().opponent(), Colour::Black);
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Colour::White.direction(), 1);
        assert_eq!(Colour::Black.direction(), -1);
        assert_eq!(Colour::White.bar_location(), 0);
        assert_eq!(Colour::Black.bar_location(), 25);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Colour::Black).unwrap();
        assert_eq!(json, "\"black\"");
    }
}

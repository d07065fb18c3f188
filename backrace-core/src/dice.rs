//! Dice rolls

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A roll as a multiset of die values still available to the mover
///
/// A non-double holds two values, a double holds the same value four times.
/// Values are removed as they are consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    values: Vec<u8>,
}

impl DiceRoll {
    /// Build a roll from two dice, expanding doubles
    pub fn new(first: u8, second: u8) -> Result<Self, GameError> {
        if !is_die(first) || !is_die(second) {
            return Err(GameError::InvalidDice(vec![first, second]));
        }
        Ok(Self::expand(first, second))
    }

    /// Build a partially consumed roll from explicit values
    pub fn from_values(values: &[u8]) -> Result<Self, GameError> {
        if values.is_empty() || values.len() > 4 || !values.iter().all(|&v| is_die(v)) {
            return Err(GameError::InvalidDice(values.to_vec()));
        }
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let first = rng.gen_range(1..=6);
        let second = rng.gen_range(1..=6);
        Self::expand(first, second)
    }

    /// Opening roll of a game: doubles are re-rolled
    pub fn opening<R: Rng>(rng: &mut R) -> Self {
        loop {
            let first = rng.gen_range(1..=6);
            let second = rng.gen_range(1..=6);
            if first != second {
                return Self::expand(first, second);
            }
        }
    }

    fn expand(first: u8, second: u8) -> Self {
        if first == second {
            Self {
                values: vec![first; 4],
            }
        } else {
            Self {
                values: vec![first, second],
            }
        }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_double(&self) -> bool {
        self.values.len() == 4
    }

    /// Consume one occurrence of `value`; false if it was not available
    pub fn remove(&mut self, value: u8) -> bool {
        match self.values.iter().position(|&v| v == value) {
            Some(idx) => {
                self.values.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn reversed(&self) -> Self {
        let mut values = self.values.clone();
        values.reverse();
        Self { values }
    }

    /// Distinct values, largest first
    pub fn distinct_descending(&self) -> Vec<u8> {
        let mut values = self.values.clone();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        values
    }

    pub fn total(&self) -> u32 {
        self.values.iter().map(|&v| v as u32).sum()
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.values)
    }
}

fn is_die(value: u8) -> bool {
    (1..=6).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_double_expands_to_four() {
        let roll = DiceRoll::new(3, 3).unwrap();
        assert_eq!(roll.values(), &[3, 3, 3, 3]);
        assert!(roll.is_double());
        assert_eq!(roll.total(), 12);
    }

    #[test]
    fn test_non_double_keeps_order() {
        let roll = DiceRoll::new(6, 5).unwrap();
        assert_eq!(roll.values(), &[6, 5]);
        assert_eq!(roll.reversed().values(), &[5, 6]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(DiceRoll::new(0, 3), Err(GameError::InvalidDice(vec![0, 3])));
        assert!(DiceRoll::new(7, 1).is_err());
        assert!(DiceRoll::from_values(&[]).is_err());
        assert!(DiceRoll::from_values(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn test_remove_consumes_one() {
        let mut roll = DiceRoll::new(2, 2).unwrap();
        assert!(roll.remove(2));
        assert_eq!(roll.len(), 3);
        assert!(!roll.remove(5));
    }

    #[test]
    fn test_opening_never_double() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let roll = DiceRoll::opening(&mut rng);
            assert_eq!(roll.len(), 2);
            assert_ne!(roll.values()[0], roll.values()[1]);
        }
    }

    #[test]
    fn test_random_roll_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let roll = DiceRoll::roll(&mut rng);
            assert!(roll.len() == 2 || roll.len() == 4);
            assert!(roll.values().iter().all(|&v| (1..=6).contains(&v)));
        }
    }

    #[test]
    fn test_distinct_descending() {
        let roll = DiceRoll::from_values(&[2, 5, 2]).unwrap();
        assert_eq!(roll.distinct_descending(), vec![5, 2]);
    }
}

//! Dice types, random sources, and rolling.
//!
//! Every die in the engine is built from ten-sided digits drawn from a
//! [`DiceSource`]. Production code passes a seeded or OS-seeded
//! [`StdRng`]; tests pass [`ScriptedDice`] to force exact outcomes.

pub mod expr;
pub mod percentile;

pub use expr::{DiceExpr, ExprRoll};
pub use percentile::{MAX_EXTRA_DICE, PercentileDice, PercentileRoll, percentile_total, roll_d100};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A source of ten-sided digits.
pub trait DiceSource {
    /// Draw one digit in `0..=9`.
    fn digit(&mut self) -> u32;
}

impl DiceSource for StdRng {
    fn digit(&mut self) -> u32 {
        self.random_range(0..10)
    }
}

impl<T: DiceSource + ?Sized> DiceSource for &mut T {
    fn digit(&mut self) -> u32 {
        (**self).digit()
    }
}

/// A fixed, repeating sequence of digits.
///
/// Digits are taken modulo 10. Once the sequence is used up it starts over,
/// and an empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    digits: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create a source that replays `digits` in order.
    pub fn new(digits: impl IntoIterator<Item = u32>) -> Self {
        Self {
            digits: digits.into_iter().map(|d| d % 10).collect(),
            cursor: 0,
        }
    }

    /// Number of digits drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn digit(&mut self) -> u32 {
        if self.digits.is_empty() {
            return 0;
        }
        let d = self.digits[self.cursor % self.digits.len()];
        self.cursor += 1;
        d
    }
}

/// Attempts made before a rejection-sampled die falls back to modulo.
///
/// Scripted sources may never produce an accepted digit.
const MAX_REJECTIONS: usize = 64;

/// A die type the engine can roll from ten-sided digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Three-sided die.
    D3,
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die (1-10).
    D10,
    /// Percentile die (1-100).
    D100,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D100 => 100,
        }
    }

    /// Parse a die from a string like "d6", "D10", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "d3" => Some(Self::D3),
            "d4" => Some(Self::D4),
            "d6" => Some(Self::D6),
            "d8" => Some(Self::D8),
            "d10" => Some(Self::D10),
            "d100" | "d%" => Some(Self::D100),
            _ => None,
        }
    }

    /// Roll this die once.
    pub fn roll(self, source: &mut impl DiceSource) -> u32 {
        match self {
            Self::D10 => roll_d10(source),
            Self::D100 => percentile_total(source.digit(), source.digit()),
            other => {
                let sides = other.sides();
                let limit = 10 - 10 % sides;
                let mut d = source.digit();
                for _ in 0..MAX_REJECTIONS {
                    if d < limit {
                        break;
                    }
                    d = source.digit();
                }
                d % sides + 1
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Roll a single d10 for magnitude (1-10, a drawn 0 reads as 10).
pub fn roll_d10(source: &mut impl DiceSource) -> u32 {
    match source.digit() {
        0 => 10,
        d => d,
    }
}

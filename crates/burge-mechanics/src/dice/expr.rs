//! Dice notation such as `1d6`, `2d4+1`, or `d100`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DiceSource, Die};
use crate::error::{MechError, MechResult};

/// Upper bound on dice in a single expression.
const MAX_DICE: u32 = 100;

/// A parsed `NdM[+K|-K]` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice to roll.
    pub count: u32,
    /// The die type.
    pub die: Die,
    /// Flat modifier added to the sum.
    pub modifier: i32,
}

impl DiceExpr {
    /// Parse dice notation. The count defaults to 1 (`d6` is `1d6`).
    pub fn parse(notation: &str) -> MechResult<Self> {
        let invalid = || MechError::InvalidRequest(format!("invalid dice notation: {notation}"));
        let s = notation.trim().to_lowercase();

        let (dice_part, modifier) = match s.find(['+', '-']) {
            Some(idx) => {
                let m: i32 = s[idx..].parse().map_err(|_| invalid())?;
                (&s[..idx], m)
            }
            None => (s.as_str(), 0),
        };

        let d_idx = dice_part.find('d').ok_or_else(invalid)?;
        let count = match &dice_part[..d_idx] {
            "" => 1,
            n => n.parse::<u32>().map_err(|_| invalid())?,
        };
        let die = Die::from_str_tag(&dice_part[d_idx..]).ok_or_else(invalid)?;

        if count == 0 || count > MAX_DICE {
            return Err(MechError::InvalidRequest(format!(
                "dice count must be between 1 and {MAX_DICE}: {notation}"
            )));
        }

        Ok(Self {
            count,
            die,
            modifier,
        })
    }

    /// Roll every die and keep the individual values.
    pub fn roll(&self, source: &mut impl DiceSource) -> ExprRoll {
        let values = (0..self.count).map(|_| self.die.roll(source)).collect();
        ExprRoll {
            expr: *self,
            values,
        }
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// The result of rolling a [`DiceExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprRoll {
    /// The expression that was rolled.
    pub expr: DiceExpr,
    /// Individual die values.
    pub values: Vec<u32>,
}

impl ExprRoll {
    /// Sum of the dice plus the modifier, floored at 0.
    pub fn total(&self) -> u32 {
        let sum: i64 = self.values.iter().map(|&v| i64::from(v)).sum();
        (sum + i64::from(self.expr.modifier)).max(0) as u32
    }
}

impl std::fmt::Display for ExprRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "{} [{}] = {}", self.expr, values.join(", "), self.total())
    }
}

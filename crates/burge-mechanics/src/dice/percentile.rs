//! Percentile (d100) rolls with bonus and penalty dice.
//!
//! A d100 is a tens digit and a units digit. Bonus and penalty dice add
//! extra tens digits; a bonus keeps the candidate that gives the best (lowest)
//! total, a penalty keeps the worst (highest). The units die is never
//! duplicated.

use serde::{Deserialize, Serialize};

use super::DiceSource;
use crate::error::{MechError, MechResult};

/// Maximum number of bonus or penalty dice on a single roll.
pub const MAX_EXTRA_DICE: u32 = 5;

/// Bonus/penalty configuration for a percentile roll.
///
/// At most one of the two counts is nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PercentileDice {
    bonus: u32,
    penalty: u32,
}

impl PercentileDice {
    /// A plain roll with no extra dice.
    pub const PLAIN: Self = Self {
        bonus: 0,
        penalty: 0,
    };

    /// Build a configuration from explicit counts.
    ///
    /// Supplying both a bonus and a penalty is rejected; use
    /// [`PercentileDice::cancelled`] to net them out first.
    pub fn new(bonus: u32, penalty: u32) -> MechResult<Self> {
        if bonus > 0 && penalty > 0 {
            return Err(MechError::InvalidRequest(format!(
                "bonus ({bonus}) and penalty ({penalty}) dice must cancel before rolling"
            )));
        }
        let extra = bonus.max(penalty);
        if extra > MAX_EXTRA_DICE {
            return Err(MechError::InvalidRequest(format!(
                "at most {MAX_EXTRA_DICE} bonus or penalty dice, got {extra}"
            )));
        }
        Ok(Self { bonus, penalty })
    }

    /// Cancel bonus against penalty dice one for one.
    pub fn cancelled(bonus: u32, penalty: u32) -> MechResult<Self> {
        let common = bonus.min(penalty);
        Self::new(bonus - common, penalty - common)
    }

    /// Build from a signed count: positive is bonus, negative is penalty.
    pub fn from_net(net: i32) -> MechResult<Self> {
        if net >= 0 {
            Self::new(net.unsigned_abs(), 0)
        } else {
            Self::new(0, net.unsigned_abs())
        }
    }

    /// Parse a modifier token: `+N` for bonus dice, `-N` for penalty dice.
    /// An empty token is a plain roll.
    pub fn parse(token: &str) -> MechResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Self::PLAIN);
        }
        let invalid = || MechError::InvalidRequest(format!("invalid dice modifier: {token}"));
        let mut chars = token.chars();
        let sign = chars.next();
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u32 = digits.parse().map_err(|_| invalid())?;
        match sign {
            Some('+') => Self::new(count, 0),
            Some('-') => Self::new(0, count),
            _ => Err(invalid()),
        }
    }

    /// Number of bonus dice.
    pub fn bonus_dice(&self) -> u32 {
        self.bonus
    }

    /// Number of penalty dice.
    pub fn penalty_dice(&self) -> u32 {
        self.penalty
    }

    /// Signed count: positive for bonus, negative for penalty.
    pub fn net(&self) -> i32 {
        self.bonus as i32 - self.penalty as i32
    }

    /// Number of tens dice rolled, including the base die.
    pub fn tens_dice(&self) -> u32 {
        1 + self.bonus + self.penalty
    }

    /// Add one penalty die, cancelling against a bonus die if present.
    pub fn with_extra_penalty(self) -> MechResult<Self> {
        Self::cancelled(self.bonus, self.penalty + 1)
    }

    /// Pick the tens digit this configuration keeps for a given units digit.
    ///
    /// Returns 0 for an empty candidate list.
    pub fn keep(&self, candidates: &[u32], units: u32) -> u32 {
        let by_total = |t: &&u32| percentile_total(**t, units);
        let kept = if self.bonus > 0 {
            candidates.iter().min_by_key(by_total)
        } else if self.penalty > 0 {
            candidates.iter().max_by_key(by_total)
        } else {
            candidates.first()
        };
        kept.copied().unwrap_or(0)
    }
}

impl std::fmt::Display for PercentileDice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.bonus, self.penalty) {
            (0, 0) => write!(f, "no modifier"),
            (b, 0) => write!(f, "{b} bonus {}", if b == 1 { "die" } else { "dice" }),
            (_, p) => write!(f, "{p} penalty {}", if p == 1 { "die" } else { "dice" }),
        }
    }
}

/// Combine a tens digit and a units digit; `00` + `0` is 100.
pub fn percentile_total(tens: u32, units: u32) -> u32 {
    match tens * 10 + units {
        0 => 100,
        v => v,
    }
}

/// The dice part of a percentile check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileRoll {
    /// Every tens digit rolled, in draw order.
    pub tens_rolled: Vec<u32>,
    /// The tens digit that was kept.
    pub chosen_tens: u32,
    /// The single units digit.
    pub units: u32,
    /// The final result, 1-100.
    pub total: u32,
}

/// Roll a d100 with the given bonus/penalty configuration.
///
/// Draws all tens candidates first, then exactly one units digit.
pub fn roll_d100(source: &mut impl DiceSource, dice: PercentileDice) -> PercentileRoll {
    let tens_rolled: Vec<u32> = (0..dice.tens_dice()).map(|_| source.digit()).collect();
    let units = source.digit();
    let chosen_tens = dice.keep(&tens_rolled, units);
    PercentileRoll {
        total: percentile_total(chosen_tens, units),
        tens_rolled,
        chosen_tens,
        units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn total_composition() {
        assert_eq!(percentile_total(0, 0), 100);
        assert_eq!(percentile_total(0, 1), 1);
        assert_eq!(percentile_total(4, 5), 45);
        assert_eq!(percentile_total(9, 9), 99);
        assert_eq!(percentile_total(9, 0), 90);
    }

    #[test]
    fn rejects_bonus_and_penalty_together() {
        assert!(matches!(
            PercentileDice::new(1, 1),
            Err(MechError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_too_many_dice() {
        assert!(PercentileDice::new(MAX_EXTRA_DICE, 0).is_ok());
        assert!(PercentileDice::new(MAX_EXTRA_DICE + 1, 0).is_err());
        assert!(PercentileDice::from_net(-(MAX_EXTRA_DICE as i32) - 1).is_err());
    }

    #[test]
    fn cancelled_nets_out() {
        let d = PercentileDice::cancelled(2, 1).unwrap();
        assert_eq!((d.bonus_dice(), d.penalty_dice()), (1, 0));
        let d = PercentileDice::cancelled(1, 3).unwrap();
        assert_eq!((d.bonus_dice(), d.penalty_dice()), (0, 2));
        assert_eq!(PercentileDice::cancelled(2, 2).unwrap(), PercentileDice::PLAIN);
    }

    #[test]
    fn from_net() {
        assert_eq!(PercentileDice::from_net(2).unwrap().bonus_dice(), 2);
        assert_eq!(PercentileDice::from_net(-1).unwrap().penalty_dice(), 1);
        assert_eq!(PercentileDice::from_net(0).unwrap(), PercentileDice::PLAIN);
        assert_eq!(PercentileDice::from_net(-2).unwrap().net(), -2);
    }

    #[test]
    fn parse_modifier_tokens() {
        assert_eq!(PercentileDice::parse("+1").unwrap().bonus_dice(), 1);
        assert_eq!(PercentileDice::parse(" -2 ").unwrap().penalty_dice(), 2);
        assert_eq!(PercentileDice::parse("").unwrap(), PercentileDice::PLAIN);
        for bad in ["abc", "1", "++1", "+", "-x", "+1.5"] {
            assert!(PercentileDice::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn extra_penalty_cancels_bonus() {
        let d = PercentileDice::new(1, 0).unwrap().with_extra_penalty().unwrap();
        assert_eq!(d, PercentileDice::PLAIN);
        let d = PercentileDice::PLAIN.with_extra_penalty().unwrap();
        assert_eq!(d.penalty_dice(), 1);
    }

    #[test]
    fn plain_roll_draws_tens_then_units() {
        let mut dice = ScriptedDice::new([4, 2]);
        let r = roll_d100(&mut dice, PercentileDice::PLAIN);
        assert_eq!(r.tens_rolled, vec![4]);
        assert_eq!(r.chosen_tens, 4);
        assert_eq!(r.units, 2);
        assert_eq!(r.total, 42);
        assert_eq!(dice.drawn(), 2);
    }

    #[test]
    fn bonus_keeps_lowest_tens() {
        let mut dice = ScriptedDice::new([7, 2, 5]);
        let r = roll_d100(&mut dice, PercentileDice::new(1, 0).unwrap());
        assert_eq!(r.tens_rolled, vec![7, 2]);
        assert_eq!(r.chosen_tens, 2);
        assert_eq!(r.total, 25);
    }

    #[test]
    fn penalty_keeps_highest_tens() {
        let mut dice = ScriptedDice::new([1, 8, 3, 5]);
        let r = roll_d100(&mut dice, PercentileDice::new(0, 2).unwrap());
        assert_eq!(r.tens_rolled, vec![1, 8, 3]);
        assert_eq!(r.chosen_tens, 8);
        assert_eq!(r.total, 85);
    }

    #[test]
    fn double_zero_is_worst_when_units_zero() {
        // Candidates 00 and 50 with units 0 give totals 100 and 50.
        let mut dice = ScriptedDice::new([0, 5, 0]);
        let bonus = roll_d100(&mut dice, PercentileDice::new(1, 0).unwrap());
        assert_eq!(bonus.total, 50);

        let mut dice = ScriptedDice::new([0, 5, 0]);
        let penalty = roll_d100(&mut dice, PercentileDice::new(0, 1).unwrap());
        assert_eq!(penalty.total, 100);
    }

    #[test]
    fn one_bonus_die_matches_closed_form() {
        // With units fixed at 5, P(kept tens <= k) = 1 - (1 - p)^2, p = (k+1)/10.
        let bonus = PercentileDice::new(1, 0).unwrap();
        for k in 0..10u32 {
            let mut hits = 0u32;
            for a in 0..10 {
                for b in 0..10 {
                    let mut dice = ScriptedDice::new([a, b, 5]);
                    if roll_d100(&mut dice, bonus).chosen_tens <= k {
                        hits += 1;
                    }
                }
            }
            let miss = 9 - k;
            assert_eq!(hits, 100 - miss * miss, "k = {k}");
        }
    }

    #[test]
    fn seeded_rolls_in_range_and_reproducible() {
        let dice = PercentileDice::new(0, 1).unwrap();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let ra = roll_d100(&mut a, dice);
            let rb = roll_d100(&mut b, dice);
            assert!((1..=100).contains(&ra.total));
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn display() {
        assert_eq!(PercentileDice::PLAIN.to_string(), "no modifier");
        assert_eq!(PercentileDice::new(1, 0).unwrap().to_string(), "1 bonus die");
        assert_eq!(PercentileDice::new(0, 2).unwrap().to_string(), "2 penalty dice");
    }
}

//! Exact odds for percentile checks.
//!
//! A roll with `n` tens dice has `10^(n+1)` equally likely digit outcomes.
//! For a fixed units digit the kept tens die is the best (bonus) or worst
//! (penalty) of `n` uniform draws, so the number of outcomes keeping the
//! candidate of rank `r` has a closed form. No sampling is involved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Difficulty, SuccessLevel, classify};
use crate::dice::{PercentileDice, percentile_total};

/// Exact number of digit outcomes producing each total 1-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalDistribution {
    dice: PercentileDice,
    counts: Vec<u64>,
    denominator: u64,
}

impl TotalDistribution {
    /// Compute the distribution for a bonus/penalty configuration.
    pub fn for_dice(dice: PercentileDice) -> Self {
        let n = dice.tens_dice();
        let mut counts = vec![0u64; 100];

        for units in 0..10 {
            // Tens digits ordered from best (lowest total) to worst.
            let mut ranked: Vec<u32> = (0..10).collect();
            ranked.sort_by_key(|&t| percentile_total(t, units));

            for (rank, &tens) in ranked.iter().enumerate() {
                let r = rank as u64;
                let ways = if dice.bonus_dice() > 0 {
                    // Best of n: all draws rank >= r, minus all draws rank > r.
                    (10 - r).pow(n) - (9 - r).pow(n)
                } else if dice.penalty_dice() > 0 {
                    (r + 1).pow(n) - r.pow(n)
                } else {
                    1
                };
                let total = percentile_total(tens, units);
                counts[(total - 1) as usize] += ways;
            }
        }

        Self {
            dice,
            counts,
            denominator: 10u64.pow(n + 1),
        }
    }

    /// The configuration this distribution describes.
    pub fn dice(&self) -> PercentileDice {
        self.dice
    }

    /// Number of equally likely outcomes.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Outcomes producing exactly `total`; 0 outside 1-100.
    pub fn count(&self, total: u32) -> u64 {
        match total {
            1..=100 => self.counts[(total - 1) as usize],
            _ => 0,
        }
    }

    /// Outcomes producing `total` or less.
    pub fn count_at_most(&self, total: u32) -> u64 {
        (1..=total.min(100)).map(|t| self.count(t)).sum()
    }

    /// Probability of exactly `total`.
    pub fn probability(&self, total: u32) -> f64 {
        self.count(total) as f64 / self.denominator as f64
    }

    /// Iterate `(total, count)` pairs from 1 to 100.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as u32 + 1, c))
    }
}

/// Exact odds of each success tier against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessOdds {
    /// The target value the odds were computed for.
    pub target: u32,
    /// The bonus/penalty configuration.
    pub dice: PercentileDice,
    counts: BTreeMap<SuccessLevel, u64>,
    denominator: u64,
}

impl SuccessOdds {
    /// Fold the total distribution through the classifier.
    pub fn compute(target: u32, dice: PercentileDice) -> Self {
        let distribution = TotalDistribution::for_dice(dice);
        let mut counts: BTreeMap<SuccessLevel, u64> =
            SuccessLevel::ALL.iter().map(|&l| (l, 0)).collect();
        for (total, ways) in distribution.iter() {
            *counts.entry(classify(total, target)).or_default() += ways;
        }
        Self {
            target,
            dice,
            counts,
            denominator: distribution.denominator(),
        }
    }

    /// Outcomes landing exactly on `level`.
    pub fn count(&self, level: SuccessLevel) -> u64 {
        self.counts.get(&level).copied().unwrap_or(0)
    }

    /// Number of equally likely outcomes.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Probability of landing exactly on `level`.
    pub fn probability(&self, level: SuccessLevel) -> f64 {
        self.count(level) as f64 / self.denominator as f64
    }

    /// Probability that the check passes at `difficulty`.
    pub fn pass_probability(&self, difficulty: Difficulty) -> f64 {
        let passing: u64 = SuccessLevel::ALL
            .iter()
            .filter(|l| l.meets(difficulty))
            .map(|&l| self.count(l))
            .sum();
        passing as f64 / self.denominator as f64
    }

    /// Iterate `(level, count)` pairs, worst tier first.
    pub fn iter(&self) -> impl Iterator<Item = (SuccessLevel, u64)> + '_ {
        self.counts.iter().map(|(&l, &c)| (l, c))
    }
}

//! Success tiers for percentile checks.
//!
//! A d100 total is compared against a target value (a skill or
//! characteristic). The classifier always reports the finest tier achieved;
//! whether that tier is enough for a Hard or Extreme check is a separate
//! reduction via [`SuccessLevel::meets`].

pub mod odds;

pub use odds::{SuccessOdds, TotalDistribution};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Outcome tier of a percentile check, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessLevel {
    /// 100, or 96-99 against a target below 50.
    Fumble,
    /// Above the target.
    Failure,
    /// At or below the target.
    Regular,
    /// At or below half the target.
    Hard,
    /// At or below a fifth of the target.
    Extreme,
    /// A natural 01.
    Critical,
}

impl SuccessLevel {
    /// All tiers, worst first.
    pub const ALL: [Self; 6] = [
        Self::Fumble,
        Self::Failure,
        Self::Regular,
        Self::Hard,
        Self::Extreme,
        Self::Critical,
    ];

    /// True for Regular and better.
    pub fn is_success(self) -> bool {
        self >= Self::Regular
    }

    /// True if this tier passes a check at the given difficulty.
    pub fn meets(self, difficulty: Difficulty) -> bool {
        self.is_success() && self >= difficulty.required_level()
    }
}

impl std::fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical Success!"),
            Self::Extreme => write!(f, "Extreme Success!"),
            Self::Hard => write!(f, "Hard Success"),
            Self::Regular => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Fumble => write!(f, "Fumble!"),
        }
    }
}

/// Classify a d100 total against a target value.
///
/// Rules are checked in order and the first match wins: 01 is always a
/// critical; 100, or 96+ against a target under 50, is a fumble; then
/// extreme (≤ target/5), hard (≤ target/2), regular (≤ target), failure.
pub fn classify(total: u32, target: u32) -> SuccessLevel {
    if total == 1 {
        return SuccessLevel::Critical;
    }
    if total >= 100 || (target < 50 && total >= 96) {
        return SuccessLevel::Fumble;
    }
    if total > target {
        SuccessLevel::Failure
    } else if total <= target / 5 {
        SuccessLevel::Extreme
    } else if total <= target / 2 {
        SuccessLevel::Hard
    } else {
        SuccessLevel::Regular
    }
}

/// Requested difficulty of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Roll at or under the full value.
    #[default]
    Regular,
    /// Roll at or under half the value.
    Hard,
    /// Roll at or under a fifth of the value.
    Extreme,
}

impl Difficulty {
    /// The lowest tier that passes at this difficulty.
    pub fn required_level(self) -> SuccessLevel {
        match self {
            Self::Regular => SuccessLevel::Regular,
            Self::Hard => SuccessLevel::Hard,
            Self::Extreme => SuccessLevel::Extreme,
        }
    }

    /// The effective target shown to players (never below 1).
    pub fn threshold(self, target: u32) -> u32 {
        match self {
            Self::Regular => target,
            Self::Hard => (target / 2).max(1),
            Self::Extreme => (target / 5).max(1),
        }
    }
}

impl FromStr for Difficulty {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" | "normal" | "r" => Ok(Self::Regular),
            "hard" | "h" => Ok(Self::Hard),
            "extreme" | "e" => Ok(Self::Extreme),
            other => Err(MechError::InvalidRequest(format!(
                "unknown difficulty '{other}': use regular, hard, or extreme"
            ))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Hard => write!(f, "Hard"),
            Self::Extreme => write!(f, "Extreme"),
        }
    }
}

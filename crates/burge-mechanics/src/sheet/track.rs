//! Bounded resource tracks (HP, MP, Sanity).
//!
//! A track is a current value clamped to `[0, max]`. The maximum is derived
//! from characteristics and changes underneath the current value; the current
//! value is re-clamped but never raised when that happens.

use serde::{Deserialize, Serialize};

/// A resource clamped between 0 and a derived maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    pub current: u32,
    /// Maximum value.
    pub max: u32,
}

impl Track {
    /// Create a track starting at its maximum.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Create a track with a starting value, clamped to the maximum.
    pub fn with_current(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.current) + i64::from(delta);
        self.current = next.clamp(0, i64::from(self.max)) as u32;
        self.current
    }

    /// Set the current value, clamped to the maximum. Returns the new value.
    pub fn set(&mut self, value: u32) -> u32 {
        self.current = value.min(self.max);
        self.current
    }

    /// Restore to the maximum.
    pub fn fill(&mut self) -> u32 {
        self.current = self.max;
        self.current
    }

    /// Replace the maximum and re-clamp the current value.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    /// Returns true if the track is at zero.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the track is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

//! Session history: pending change lines and committed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committed session entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Sheet version this entry produced.
    pub version: u32,
    /// When the entry was committed.
    pub timestamp: DateTime<Utc>,
    /// Player-supplied note, e.g. "Session 12 - The Lighthouse".
    pub note: String,
    /// Change lines recorded since the previous entry.
    pub changes: Vec<String>,
}

impl HistoryEntry {
    /// A one-line summary showing at most `limit` changes.
    pub fn summary(&self, limit: usize) -> String {
        let mut line = self
            .changes
            .iter()
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if self.changes.len() > limit {
            line.push_str(&format!(", +{} more", self.changes.len() - limit));
        }
        line
    }
}

//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
///
/// Every operation that returns one of these leaves the character untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A malformed request: bad dice modifier, unknown difficulty, bad amount.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A character or skill that must already exist was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The XP pool cannot cover a spend.
    #[error("insufficient XP: have {have}, need {need}")]
    InsufficientXp {
        /// XP currently in the pool.
        have: u32,
        /// XP the spend asked for.
        need: u32,
    },

    /// The interchange document is malformed.
    #[error("import failed at '{field}': {reason}")]
    ImportSchema {
        /// The offending field path.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two imported skills resolve to the same canonical skill.
    #[error("duplicate skill '{name}' (from '{first}' and '{second}')")]
    DuplicateSkill {
        /// The canonical skill both entries resolve to.
        name: String,
        /// The first source name.
        first: String,
        /// The second source name.
        second: String,
    },

    /// The character store failed to load or save a record.
    #[error("store error: {0}")]
    Store(String),
}

impl MechError {
    /// Shorthand for an [`MechError::ImportSchema`] error.
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImportSchema {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

//! Error type shared by the whole crate.

use thiserror::Error;

/// Everything that can go wrong while building or running a search.
///
/// Empty outcomes (no targets, no criteria, nothing matched) are never
/// errors; they are recorded in the [`FinderResult`](crate::FinderResult).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError {
    /// Unknown keys/flags, or flags that cannot be combined. `offending`
    /// always lists every problem found, not just the first.
    #[error("{reason}: {}", .offending.join(", "))]
    InvalidOptions { reason: &'static str, offending: Vec<String> },

    /// A criterion failed to compile.
    #[error("invalid member pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A type with this name is already registered.
    #[error("type {0:?} is already defined")]
    DuplicateType(String),

    /// A handle that the registry never issued.
    #[error("unknown handle {0}")]
    UnknownHandle(String),

    /// The registry ran out of handle indices for this table.
    #[error("registry cannot hold more {0}")]
    RegistryFull(&'static str),
}

impl FinderError {
    pub(crate) fn unrecognized(offending: Vec<String>) -> Self {
        FinderError::InvalidOptions { reason: "unrecognized option(s)", offending }
    }

    pub(crate) fn singleton_conflict(offending: Vec<String>) -> Self {
        FinderError::InvalidOptions {
            reason: "the class, public, protected, and private flags can't be used with the singleton flag",
            offending,
        }
    }

    /// Offending keys for an `InvalidOptions` error, empty otherwise.
    pub fn offending(&self) -> &[String] {
        match self {
            FinderError::InvalidOptions { offending, .. } => offending,
            _ => &[],
        }
    }
}

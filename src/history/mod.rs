//! Search-history subsystem.
//!
//! # Data Flow
//! ```text
//! session start
//!     → store.rs load() (read key, parse, normalize; fail soft to empty)
//! each search / removal
//!     → store.rs save() / remove() (compute candidate list)
//!     → storage.rs set_item() (full list rewritten as JSON)
//!     → commit candidate to memory only if the write succeeded
//! ```
//!
//! # Design Decisions
//! - State is an owned `SearchHistory` value, never a global
//! - Storage failures never escape as `Err`; they come back as `Outcome::Discarded`
//! - On a failed write memory is rolled back so it always mirrors storage
//! - Persisted format: JSON array of `{"gameName", "tagLine"}` objects

pub mod storage;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::SearchHistory;

/// Storage key holding the serialized list.
pub const HISTORY_KEY: &str = "lolgg_search_history";

/// Maximum number of entries kept.
pub const MAX_HISTORY: usize = 10;

/// One remembered search. Identity is the (game_name, tag_line) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub game_name: String,
    pub tag_line: String,
}

impl SearchHistoryEntry {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    /// True if this entry has the given identity.
    pub fn is(&self, game_name: &str, tag_line: &str) -> bool {
        self.game_name == game_name && self.tag_line == tag_line
    }
}

impl fmt::Display for SearchHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Errors that cause a history operation to be discarded.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The storage backend failed to read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not a JSON list of entries.
    #[error("stored history is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The list could not be serialized.
    #[error("failed to encode history: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result of a history operation.
///
/// Operations never fail outright; callers that care about degradation
/// inspect this instead.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// State changed (or was read) and storage matches memory.
    Applied,
    /// Nothing to do; neither memory nor storage was touched.
    Ignored,
    /// Storage failed; memory was left as it was before the call.
    Discarded(HistoryError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn error(&self) -> Option<&HistoryError> {
        match self {
            Outcome::Discarded(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::Ignored => "ignored",
            Outcome::Discarded(_) => "discarded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_format() {
        let entry = SearchHistoryEntry::new("Faker", "KR1");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"gameName":"Faker","tagLine":"KR1"}"#);
    }

    #[test]
    fn test_entry_identity() {
        let entry = SearchHistoryEntry::new("Faker", "KR1");
        assert!(entry.is("Faker", "KR1"));
        assert!(!entry.is("Faker", "kr1"));
        assert_eq!(entry.to_string(), "Faker#KR1");
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(Outcome::Applied.is_applied());
        assert!(Outcome::Ignored.error().is_none());

        let discarded = Outcome::Discarded(HistoryError::Storage(StorageError::QuotaExceeded {
            key: "k".into(),
            requested: 10,
            quota: 5,
        }));
        assert!(!discarded.is_applied());
        assert!(discarded.error().unwrap().to_string().contains("quota"));
    }
}

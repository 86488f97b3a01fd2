//! Bounded, deduplicated, most-recent-first search history.

use std::collections::HashSet;

use crate::history::storage::Storage;
use crate::history::{HistoryError, Outcome, SearchHistoryEntry, HISTORY_KEY, MAX_HISTORY};
use crate::observability::metrics;

/// The search history of one session, owned by whoever drives the UI.
///
/// Invariants: at most [`MAX_HISTORY`] entries, no repeated identity,
/// index 0 is the most recent. After every applied mutation storage holds
/// exactly the serialized in-memory list.
#[derive(Debug)]
pub struct SearchHistory<S> {
    storage: S,
    key: String,
    entries: Vec<SearchHistoryEntry>,
    loaded: bool,
}

impl<S: Storage> SearchHistory<S> {
    /// History under the default storage key. Nothing is read until [`load`](Self::load).
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, HISTORY_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Replace in-memory state with the persisted list.
    ///
    /// A missing key yields an empty list. Unreadable or unparsable values
    /// also yield an empty list, reported as `Discarded`.
    pub fn load(&mut self) -> Outcome {
        self.loaded = true;

        let outcome = match self.read() {
            Ok(entries) => {
                self.entries = entries;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Search history unreadable, starting empty"
                );
                self.entries.clear();
                Outcome::Discarded(e)
            }
        };

        tracing::debug!(key = %self.key, entries = self.entries.len(), "Search history loaded");
        self.record("load", &outcome);
        outcome
    }

    /// Record a search: move or insert the identity at the front, evicting
    /// the oldest entry past [`MAX_HISTORY`].
    pub fn save(&mut self, game_name: &str, tag_line: &str) -> Outcome {
        self.ensure_loaded();

        let mut candidate: Vec<SearchHistoryEntry> = self
            .entries
            .iter()
            .filter(|e| !e.is(game_name, tag_line))
            .cloned()
            .collect();
        candidate.insert(0, SearchHistoryEntry::new(game_name, tag_line));
        candidate.truncate(MAX_HISTORY);

        let outcome = self.commit(candidate);
        self.record("save", &outcome);
        outcome
    }

    /// Delete the entry at `index`. Out-of-range indexes change nothing.
    pub fn remove(&mut self, index: usize) -> Outcome {
        self.ensure_loaded();

        let outcome = if index >= self.entries.len() {
            tracing::debug!(
                index,
                len = self.entries.len(),
                "Ignoring removal past end of history"
            );
            Outcome::Ignored
        } else {
            let mut candidate = self.entries.clone();
            candidate.remove(index);
            self.commit(candidate)
        };

        self.record("remove", &outcome);
        outcome
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SearchHistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            // A failed load leaves an empty list; the next write replaces the bad value.
            let _ = self.load();
        }
    }

    fn read(&self) -> Result<Vec<SearchHistoryEntry>, HistoryError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let entries: Vec<SearchHistoryEntry> =
            serde_json::from_str(&raw).map_err(HistoryError::Corrupt)?;
        Ok(normalize(entries))
    }

    /// Persist `candidate`, then adopt it. Memory is untouched on failure.
    fn commit(&mut self, candidate: Vec<SearchHistoryEntry>) -> Outcome {
        let result = serde_json::to_string(&candidate)
            .map_err(HistoryError::Encode)
            .and_then(|json| Ok(self.storage.set_item(&self.key, &json)?));

        match result {
            Ok(()) => {
                self.entries = candidate;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Search history write failed, change discarded"
                );
                Outcome::Discarded(e)
            }
        }
    }

    fn record(&self, op: &'static str, outcome: &Outcome) {
        metrics::record_history_event(op, outcome.label());
        metrics::record_history_size(self.entries.len());
    }
}

/// Enforce list invariants on data read from storage: first occurrence of
/// each identity wins, then cap the length.
fn normalize(mut entries: Vec<SearchHistoryEntry>) -> Vec<SearchHistoryEntry> {
    let mut seen = HashSet::new();
    entries.retain(|e| seen.insert((e.game_name.clone(), e.tag_line.clone())));
    entries.truncate(MAX_HISTORY);
    entries
}

//! Request parameter types and error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Default first match offset.
pub const DEFAULT_START: u32 = 0;

/// Default page size for match history.
pub const DEFAULT_COUNT: u32 = 20;

/// Errors surfaced by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Backend answered 2xx with a body that is not JSON.
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot carry a path.
    #[error("invalid base URL '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// Status code of a non-2xx response, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Open-ended extra query parameters for the match list.
///
/// Insertion order is preserved; inserting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    params: Vec<(String, String)>,
}

impl MatchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary filter key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        upsert(&mut self.params, key.into(), value.to_string());
        self
    }

    /// Restrict to a queue id (e.g. 420 for ranked solo).
    pub fn queue(mut self, queue_id: i32) -> Self {
        self.insert("queue", queue_id);
        self
    }

    /// Restrict to a match type (e.g. "ranked", "normal").
    pub fn game_type(mut self, kind: &str) -> Self {
        self.insert("type", kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for MatchFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = MatchFilter::new();
        for (k, v) in iter {
            filter.insert(k, v);
        }
        filter
    }
}

/// Pagination and filter for a match-history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub start: u32,
    pub count: u32,
    pub filter: MatchFilter,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            count: DEFAULT_COUNT,
            filter: MatchFilter::default(),
        }
    }
}

impl MatchQuery {
    pub fn page(start: u32, count: u32) -> Self {
        Self {
            start,
            count,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: MatchFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Final query pairs: `start`, `count`, then filter keys.
    ///
    /// A filter key equal to `start` or `count` overrides the pagination
    /// value without moving it.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("start".to_string(), self.start.to_string()),
            ("count".to_string(), self.count.to_string()),
        ];
        for (k, v) in self.filter.iter() {
            upsert(&mut pairs, k.to_string(), v.to_string());
        }
        pairs
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => pairs.push((key, value)),
    }
}

//! Client library for the lolgg statistics site.
//!
//! Three independent components:
//! - [`api`]: HTTP calls for summoner search, match history and tier lookup
//! - [`history`]: bounded most-recent-first search history in key-value storage
//! - [`routing`]: the page route table
//!
//! plus the [`config`] and [`observability`] plumbing shared by the binary.

pub mod api;
pub mod config;
pub mod history;
pub mod observability;
pub mod routing;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use history::{SearchHistory, SearchHistoryEntry};
pub use routing::{Page, Router};

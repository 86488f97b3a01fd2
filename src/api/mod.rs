//! Backend API client.
//!
//! # Data Flow
//! ```text
//! caller (CLI / view layer)
//!     → client.rs (build URL, query, body; send)
//!     → backend  GET  /summoner?gameName=&tagLine=
//!                GET  /matches/{identifier}?start=&count=&<filter>
//!                POST /tiers  [identifier, ...]
//!     → opaque JSON body or ApiError
//! ```
//!
//! # Design Decisions
//! - No retries, no caching, no local validation of inputs
//! - Non-2xx and transport failures propagate unchanged as `ApiError`
//! - Payloads stay `serde_json::Value`; this layer does not model matches or tiers

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{ApiError, ApiResult, MatchFilter, MatchQuery};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! api / history / routing produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event for machine parsing
//! - Request ID flows from the API client into its log events
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;

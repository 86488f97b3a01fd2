//! Page routing.
//!
//! # Data Flow
//! ```text
//! Location path ("/summoner/Hide%20on%20bush/KR1?x=1")
//!     → router.rs (strip query/fragment, try routes in order)
//!     → matcher.rs (segment-by-segment pattern match, decode params)
//!     → Return: RouteMatch::Matched(Page) or RouteMatch::NoMatch
//!
//! Page → router.rs path_for → matcher.rs format → encoded path
//! ```
//!
//! # Design Decisions
//! - Static table, immutable after construction
//! - First match wins
//! - Literal segments match case-insensitively, one trailing slash tolerated
//! - Explicit NoMatch rather than silent default

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, Params, PathPattern, PatternError, Segment};
pub use router::{Page, Route, RouteMatch, RouteName, Router};

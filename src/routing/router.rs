//! Route lookup.
//!
//! # Responsibilities
//! - Hold the page route table
//! - Resolve a path to a page, or explicit no-match
//! - Build the path for a page (reverse routing)
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan over routes (two entries)

use std::fmt;

use crate::routing::matcher::{Matcher, Params, PathPattern, Segment};

const GAME_NAME: &str = "gameName";
const TAG_LINE: &str = "tagLine";

/// Route identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Summoner,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::Summoner => "Summoner",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page the application can show, with the values it is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Summoner { game_name: String, tag_line: String },
}

impl Page {
    pub fn summoner(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Page::Summoner {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    pub fn name(&self) -> RouteName {
        match self {
            Page::Home => RouteName::Home,
            Page::Summoner { .. } => RouteName::Summoner,
        }
    }

    fn from_params(name: RouteName, params: &Params) -> Option<Self> {
        match name {
            RouteName::Home => Some(Page::Home),
            RouteName::Summoner => Some(Page::summoner(
                params.get(GAME_NAME)?,
                params.get(TAG_LINE)?,
            )),
        }
    }

    fn params(&self) -> Params {
        match self {
            Page::Home => Params::new(),
            Page::Summoner { game_name, tag_line } => Params::new()
                .with(GAME_NAME, game_name.as_str())
                .with(TAG_LINE, tag_line.as_str()),
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: RouteName,
    pub pattern: PathPattern,
}

impl Route {
    pub fn new(name: RouteName, pattern: PathPattern) -> Self {
        Self { name, pattern }
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Matched(Page),
    NoMatch,
}

/// The page route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    /// `/` → Home, `/summoner/:gameName/:tagLine` → Summoner.
    fn default() -> Self {
        Self::new(vec![
            Route::new(RouteName::Home, PathPattern::root()),
            Route::new(
                RouteName::Summoner,
                PathPattern::from_segments([
                    Segment::literal("summoner"),
                    Segment::param(GAME_NAME),
                    Segment::param(TAG_LINE),
                ]),
            ),
        ])
    }
}

impl Router {
    /// Routes are tried in the given order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a location path (query and fragment allowed) to a page.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };
            if let Some(page) = Page::from_params(route.name, &params) {
                tracing::trace!(path, route = %route.name, "Route matched");
                return RouteMatch::Matched(page);
            }
        }

        tracing::debug!(path, "No route matched");
        RouteMatch::NoMatch
    }

    /// Path that opens `page`, or `None` if the table has no route for it
    /// or a required parameter is empty.
    pub fn path_for(&self, page: &Page) -> Option<String> {
        let route = self.routes.iter().find(|r| r.name == page.name())?;
        route.pattern.format(&page.params())
    }
}

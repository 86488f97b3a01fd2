//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns like `/summoner/:gameName/:tagLine`
//! - Match a path against a pattern, capturing parameters
//! - Format a pattern back into a path from parameters
//!
//! # Design Decisions
//! - Literal segments are case-insensitive, parameters keep their case
//! - Parameters must be non-empty; they are percent-decoded on match
//!   and percent-encoded on format
//! - No regex, a pattern is a flat list of segments

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

/// Characters escaped when a parameter is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Trait for matching a location path.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Captured parameters if `path` matches, `None` otherwise.
    fn matches(&self, path: &str) -> Option<Params>;
}

/// Errors from parsing a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern '{0}' has a parameter without a name")]
    UnnamedParam(String),

    #[error("pattern '{pattern}' declares parameter '{name}' twice")]
    DuplicateParam { pattern: String, name: String },
}

/// One segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    pub fn literal(value: impl Into<String>) -> Self {
        Segment::Literal(value.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Segment::Param(name.into())
    }
}

/// Parameters captured from a path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// The `/` pattern.
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse `/literal/:param/...`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;

        let mut segments = Vec::new();
        for part in rest.split('/').filter(|p| !p.is_empty()) {
            match part.strip_prefix(':') {
                Some("") => return Err(PatternError::UnnamedParam(pattern.to_string())),
                Some(name) => {
                    if segments.iter().any(|s| matches!(s, Segment::Param(n) if n == name)) {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::param(name));
                }
                None => segments.push(Segment::literal(part)),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Build a path from parameters. `None` if a parameter is missing or empty.
    pub fn format(&self, params: &Params) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => {
                    let value = params.get(name).filter(|v| !v.is_empty())?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Some(path)
    }
}

impl Matcher for PathPattern {
    fn matches(&self, path: &str) -> Option<Params> {
        let path = normalize_path(path);
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if !decode(part).eq_ignore_ascii_case(lit) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.0.push((name.clone(), decode(part)));
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => write!(f, "/{}", lit)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        Ok(())
    }
}

/// Drop query and fragment, the leading slash, and one trailing slash.
fn normalize_path(path: &str) -> &str {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    let path = &path[..end];
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

fn decode(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summoner() -> PathPattern {
        PathPattern::parse("/summoner/:gameName/:tagLine").unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            summoner().segments(),
            [Segment::literal("summoner"), Segment::param("gameName"), Segment::param("tagLine")]
        );
        assert_eq!(PathPattern::parse("/").unwrap(), PathPattern::root());
        assert_eq!(summoner().to_string(), "/summoner/:gameName/:tagLine");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PathPattern::parse("summoner"),
            Err(PatternError::MissingLeadingSlash(_))
        ));
        assert!(matches!(PathPattern::parse("/a/:"), Err(PatternError::UnnamedParam(_))));
        assert!(matches!(PathPattern::parse("/:a/:a"), Err(PatternError::DuplicateParam { .. })));
    }

    #[test]
    fn test_root_matches() {
        let root = PathPattern::root();
        assert!(root.matches("/").is_some());
        assert!(root.matches("").is_some());
        assert!(root.matches("/?ref=home").is_some());
        assert!(root.matches("/summoner").is_none());
    }

    #[test]
    fn test_captures_params() {
        let params = summoner().matches("/summoner/Faker/KR1").unwrap();
        assert_eq!(params.get("gameName"), Some("Faker"));
        assert_eq!(params.get("tagLine"), Some("KR1"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_decodes_params() {
        let params = summoner().matches("/summoner/Hide%20on%20bush/KR1").unwrap();
        assert_eq!(params.get("gameName"), Some("Hide on bush"));
    }

    #[test]
    fn test_lenient_literal_and_trailing_slash() {
        assert!(summoner().matches("/Summoner/Faker/KR1/").is_some());
        assert!(summoner().matches("/summoner/Faker/KR1#top").is_some());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let pattern = summoner();
        assert!(pattern.matches("/summoner/Faker").is_none());
        assert!(pattern.matches("/summoner/Faker/KR1/extra").is_none());
        assert!(pattern.matches("/summoner//KR1").is_none());
        assert!(pattern.matches("/player/Faker/KR1").is_none());
    }

    #[test]
    fn test_format_encodes() {
        let params = Params::new().with("gameName", "Hide on bush").with("tagLine", "KR/1");
        assert_eq!(
            summoner().format(&params).as_deref(),
            Some("/summoner/Hide%20on%20bush/KR%2F1")
        );
        assert_eq!(PathPattern::root().format(&Params::new()).as_deref(), Some("/"));
    }

    #[test]
    fn test_format_requires_params() {
        let params = Params::new().with("gameName", "Faker");
        assert!(summoner().format(&params).is_none());

        let params = params.with("tagLine", "");
        assert!(summoner().format(&params).is_none());
    }
}

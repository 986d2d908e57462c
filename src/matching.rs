//! Segment-based path patterns
//!
//! A [`PathPattern`] is compiled once, when URLs are registered, and is then
//! compared positionally against the components of incoming URL paths.
//!
//! # Design
//!
//! - Split paths by '/' into segments, dropping empty ones
//! - Match literal segments exactly
//! - A bare `*` matches any single segment; `*name` is an ordinary literal
//! - `{name}` (or `:name`) matches any single segment and captures it
//! - The pattern and the path must have the same number of segments; there is
//!   no prefix matching and a wildcard never consumes more than one segment

use std::collections::HashMap;
use std::fmt;

/// Matcher for one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentMatcher {
    /// Matches the exact string.
    Literal(String),
    /// Matches any segment.
    Wildcard,
    /// Matches any segment and records it under the given name.
    Parameter(String),
}

impl SegmentMatcher {
    /// Compile a single template segment.
    pub fn parse(segment: &str) -> Self {
        if let Some(name) = extract_param_name(segment) {
            Self::Parameter(name.to_string())
        } else if segment == "*" {
            Self::Wildcard
        } else {
            Self::Literal(segment.to_string())
        }
    }

    /// Check whether this matcher accepts `component`.
    pub fn matches(&self, component: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == component,
            Self::Wildcard | Self::Parameter(_) => true,
        }
    }
}

impl fmt::Display for SegmentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Wildcard => f.write_str("*"),
            Self::Parameter(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// An ordered sequence of segment matchers compiled from a path template.
///
/// # Examples
///
/// ```
/// use route_navigator::{PathPattern, SegmentMatcher};
///
/// let pattern = PathPattern::parse("/users/{id}/*");
/// assert_eq!(
///     pattern.segments(),
///     &[
///         SegmentMatcher::Literal("users".into()),
///         SegmentMatcher::Parameter("id".into()),
///         SegmentMatcher::Wildcard,
///     ]
/// );
///
/// let captures = pattern.match_components(&["users", "42", "edit"]).unwrap();
/// assert_eq!(captures.get("id").map(String::as_str), Some("42"));
///
/// // Segment counts must be equal.
/// assert!(pattern.match_components(&["users", "42"]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<SegmentMatcher>,
}

impl PathPattern {
    /// Compile a path template.
    pub fn parse(template: &str) -> Self {
        Self {
            segments: template
                .split('/')
                .filter(|s| !s.is_empty())
                .map(SegmentMatcher::parse)
                .collect(),
        }
    }

    /// Build a pattern from already compiled matchers.
    pub fn from_segments(segments: Vec<SegmentMatcher>) -> Self {
        Self { segments }
    }

    /// The compiled matchers, in order.
    pub fn segments(&self) -> &[SegmentMatcher] {
        &self.segments
    }

    /// Number of segments the pattern expects.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Return `true` for the root pattern (`""` or `"/"`).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return `true` if the pattern captures at least one parameter.
    pub fn has_parameters(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, SegmentMatcher::Parameter(_)))
    }

    /// Check whether the pattern accepts the path components, without
    /// collecting captures.
    pub fn matches<S: AsRef<str>>(&self, components: &[S]) -> bool {
        self.segments.len() == components.len()
            && self
                .segments
                .iter()
                .zip(components)
                .all(|(segment, component)| segment.matches(component.as_ref()))
    }

    /// Match path components one-to-one, returning captured parameters.
    ///
    /// Returns `None` if the segment counts differ or any matcher rejects its
    /// component. A name captured twice keeps the last value.
    pub fn match_components<S: AsRef<str>>(
        &self,
        components: &[S],
    ) -> Option<HashMap<String, String>> {
        if self.segments.len() != components.len() {
            return None;
        }

        let mut captures = HashMap::new();
        for (segment, component) in self.segments.iter().zip(components) {
            let component = component.as_ref();
            if !segment.matches(component) {
                return None;
            }
            if let SegmentMatcher::Parameter(name) = segment {
                captures.insert(name.clone(), component.to_string());
            }
        }

        Some(captures)
    }
}

impl From<&str> for PathPattern {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

impl From<String> for PathPattern {
    fn from(template: String) -> Self {
        Self::parse(&template)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// The parameter name of a `{name}` or `:name` segment.
fn extract_param_name(segment: &str) -> Option<&str> {
    let name = segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .or_else(|| segment.strip_prefix(':'))?;
    (!name.is_empty()).then_some(name)
}

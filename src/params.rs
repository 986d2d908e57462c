//! Parameter extraction from matched URLs.
//!
//! A [`MatchedUrl`] is handed to dynamic URL mappings. It gives typed access
//! to two kinds of parameters:
//!
//! - **path parameters**, captured by `{name}` segments of the pattern. These
//!   are required: asking for a missing or malformed one is an error that
//!   aborts the URL open.
//! - **query parameters**, parsed lazily from the `?key=value&...` portion of
//!   the URL. These are optional and never fail.
//!
//! # Example
//!
//! ```
//! use route_navigator::{MatchedUrl, PathPattern};
//! use url::Url;
//!
//! let url = Url::parse("https://example.com/users/42?full=true").unwrap();
//! let matched = PathPattern::parse("users/{id}")
//!     .match_components(&["users", "42"])
//!     .map(|captures| MatchedUrl::new(url, captures))
//!     .unwrap();
//!
//! assert_eq!(matched.path("id").unwrap(), "42");
//! assert_eq!(matched.path_int("id").unwrap(), 42);
//! assert_eq!(matched.query("full"), Some("true"));
//! assert_eq!(matched.query("missing"), None);
//! ```

use crate::error::{Result, RouterError};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::str::FromStr;
use url::{form_urlencoded, Url};

/// A URL that matched a registered path pattern.
#[derive(Debug, Clone)]
pub struct MatchedUrl {
    url: Url,
    path_parameters: HashMap<String, String>,
    query_parameters: OnceCell<HashMap<String, String>>,
}

impl MatchedUrl {
    /// Create a matched URL from the raw URL and the captured path parameters.
    pub fn new(url: Url, path_parameters: HashMap<String, String>) -> Self {
        Self {
            url,
            path_parameters,
            query_parameters: OnceCell::new(),
        }
    }

    /// The URL that was matched.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL scheme (e.g. `"https"`).
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// URL host (e.g. `"example.com"`), if the URL has one.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// All captured path parameters, with their raw (undecoded) values.
    pub fn path_parameters(&self) -> &HashMap<String, String> {
        &self.path_parameters
    }

    /// Retrieve a required path parameter.
    pub fn path(&self, name: &str) -> Result<&str> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RouterError::MissingRequiredPathParameter {
                parameter: name.to_string(),
            })
    }

    /// Retrieve a required path parameter as an integer.
    pub fn path_int(&self, name: &str) -> Result<i64> {
        let value = self.path(name)?;
        value
            .parse()
            .map_err(|_| RouterError::RequiredIntegerParameterNotAnInteger {
                parameter: name.to_string(),
                value: value.to_string(),
            })
    }

    /// Retrieve a required path parameter and parse it as `T`.
    pub fn path_as<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
    {
        let value = self.path(name)?;
        value
            .parse()
            .map_err(|_| RouterError::InvalidPathParameter {
                parameter: name.to_string(),
                value: value.to_string(),
            })
    }

    /// Query string parameters, decoded. The last value wins for repeated
    /// keys; items without a `=` are skipped.
    pub fn query_parameters(&self) -> &HashMap<String, String> {
        self.query_parameters
            .get_or_init(|| parse_query(self.url.query().unwrap_or_default()))
    }

    /// Retrieve an optional query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters().get(name).map(String::as_str)
    }

    /// Retrieve an optional query parameter as an integer.
    ///
    /// Returns `None` if the parameter is missing or not an integer.
    pub fn query_int(&self, name: &str) -> Option<i64> {
        self.query_as(name)
    }

    /// Retrieve an optional query parameter parsed as `T`.
    pub fn query_as<T>(&self, name: &str) -> Option<T>
    where
        T: FromStr,
    {
        self.query(name)?.parse().ok()
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| pair.contains('='))
        .flat_map(|pair| form_urlencoded::parse(pair.as_bytes()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(url: &str, captures: &[(&str, &str)]) -> MatchedUrl {
        MatchedUrl::new(
            Url::parse(url).unwrap(),
            captures
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_path_parameter() {
        let m = matched("https://example.com/users/42", &[("id", "42")]);
        assert_eq!(m.path("id").unwrap(), "42");
        assert_eq!(m.path_int("id").unwrap(), 42);
        assert_eq!(m.path_as::<u8>("id").unwrap(), 42);
    }

    #[test]
    fn test_missing_path_parameter() {
        let m = matched("https://example.com/users/42", &[("id", "42")]);
        match m.path("name") {
            Err(RouterError::MissingRequiredPathParameter { parameter }) => {
                assert_eq!(parameter, "name");
            }
            other => panic!("Expected missing parameter error, got {other:?}"),
        }
        assert!(matches!(
            m.path_int("name"),
            Err(RouterError::MissingRequiredPathParameter { .. })
        ));
    }

    #[test]
    fn test_path_parameter_not_an_integer() {
        let m = matched("https://example.com/users/bob", &[("id", "bob")]);
        match m.path_int("id") {
            Err(RouterError::RequiredIntegerParameterNotAnInteger { parameter, value }) => {
                assert_eq!(parameter, "id");
                assert_eq!(value, "bob");
            }
            other => panic!("Expected integer error, got {other:?}"),
        }
        assert!(matches!(
            m.path_as::<u32>("id"),
            Err(RouterError::InvalidPathParameter { .. })
        ));
    }

    #[test]
    fn test_query_parameters() {
        let m = matched("https://example.com/products?page=2&sort=name%20asc", &[]);
        assert_eq!(m.query("page"), Some("2"));
        assert_eq!(m.query_int("page"), Some(2));
        assert_eq!(m.query("sort"), Some("name asc"));
        assert_eq!(m.query("missing"), None);
        assert_eq!(m.query_int("sort"), None);
        assert_eq!(m.query_as::<bool>("page"), None);
    }

    #[test]
    fn test_query_last_value_wins() {
        let m = matched("https://example.com/?tag=a&tag=b&tag=c", &[]);
        assert_eq!(m.query("tag"), Some("c"));
        assert_eq!(m.query_parameters().len(), 1);
    }

    #[test]
    fn test_query_items_without_value_are_skipped() {
        let m = matched("https://example.com/?flag&empty=&x=1", &[]);
        assert_eq!(m.query("flag"), None);
        assert_eq!(m.query("empty"), Some(""));
        assert_eq!(m.query("x"), Some("1"));
    }

    #[test]
    fn test_no_query() {
        let m = matched("https://example.com/", &[]);
        assert!(m.query_parameters().is_empty());
    }

    #[test]
    fn test_scheme_and_host() {
        let m = matched("myapp://profile/42", &[]);
        assert_eq!(m.scheme(), "myapp");
        assert_eq!(m.host(), Some("profile"));
        assert_eq!(m.url().as_str(), "myapp://profile/42");
    }
}

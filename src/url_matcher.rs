//! URL → route resolution.
//!
//! A [`UrlMatcher`] pairs a scheme/host filter with a [`UrlPathMapper`].
//! A [`UrlMatcherGroup`] keeps matchers in registration order and returns the
//! route of the first one that matches.
//!
//! Resolution runs in two phases per matcher:
//!
//! 1. **Filter** - the URL's scheme and host must be accepted (case-insensitive).
//! 2. **Path** - static patterns, then dynamic patterns, in registration order.
//!
//! A URL that no matcher accepts resolves to `Ok(None)`: an unknown link is a
//! normal outcome, not a failure.
//!
//! # Example
//!
//! ```
//! use route_navigator::{RouteType, StringMatcher, UrlMatcher, UrlMatcherGroup};
//! use url::Url;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Products { page: i64 },
//!     Logout,
//!     Deep(i64),
//! }
//! impl RouteType for Route {}
//!
//! let group = UrlMatcherGroup::group(
//!     StringMatcher::many(["example.com", "www.example.com"]),
//!     StringMatcher::Any,
//!     |paths| {
//!         paths.map("products", |url| Ok(Route::Products { page: url.query_int("page").unwrap_or(0) }));
//!         paths.map_static("user/*/logout", || Ok(Route::Logout));
//!     },
//! )
//! .with(UrlMatcher::scheme("myapp", |paths| {
//!     paths.map("items/{id}", |url| Ok(Route::Deep(url.path_int("id")?)));
//! }));
//!
//! let url = Url::parse("https://WWW.example.com/products?page=3").unwrap();
//! assert_eq!(group.find_match(&url).unwrap(), Some(Route::Products { page: 3 }));
//!
//! let url = Url::parse("myapp://open/items/9").unwrap();
//! assert_eq!(group.find_match(&url).unwrap(), Some(Route::Deep(9)));
//!
//! let url = Url::parse("https://elsewhere.org/products").unwrap();
//! assert_eq!(group.find_match(&url).unwrap(), None);
//! ```

use crate::error::Result;
use crate::mapper::UrlPathMapper;
use crate::route::RouteType;
use crate::string_matcher::StringMatcher;
use crate::{debug_log, trace_log};
use url::Url;

/// URL mappings for a set of paths on some hosts and schemes.
#[derive(Debug)]
pub struct UrlMatcher<R> {
    hosts: StringMatcher,
    schemes: StringMatcher,
    paths: UrlPathMapper<R>,
}

impl<R: RouteType> UrlMatcher<R> {
    /// Build a matcher for the given host and scheme filters.
    pub fn new<F>(hosts: StringMatcher, schemes: StringMatcher, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        let mut paths = UrlPathMapper::new();
        map_paths(&mut paths);
        Self {
            hosts,
            schemes,
            paths,
        }
    }

    /// Match paths on one host, with any scheme.
    pub fn host<F>(host: impl Into<String>, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(StringMatcher::one(host), StringMatcher::Any, map_paths)
    }

    /// Match paths on one scheme, with any host.
    pub fn scheme<F>(scheme: impl Into<String>, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(StringMatcher::Any, StringMatcher::one(scheme), map_paths)
    }

    /// Match paths on some hosts and schemes.
    pub fn group<F>(hosts: StringMatcher, schemes: StringMatcher, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(hosts, schemes, map_paths)
    }

    /// Host filter.
    pub fn hosts(&self) -> &StringMatcher {
        &self.hosts
    }

    /// Scheme filter.
    pub fn schemes(&self) -> &StringMatcher {
        &self.schemes
    }

    /// Check the scheme and host filters only.
    pub fn accepts(&self, url: &Url) -> bool {
        self.schemes.matches(Some(url.scheme())) && self.hosts.matches(url.host_str())
    }

    /// Match a URL against this matcher's filters and paths.
    pub fn match_url(&self, url: &Url) -> Result<Option<R>> {
        if !self.accepts(url) {
            trace_log!(
                "URL matcher {:?}/{:?} rejected '{}'",
                self.schemes,
                self.hosts,
                url
            );
            return Ok(None);
        }
        self.paths.match_url(url)
    }
}

/// Ordered list of [`UrlMatcher`]s; the first match wins.
#[derive(Debug)]
pub struct UrlMatcherGroup<R> {
    matchers: Vec<UrlMatcher<R>>,
}

impl<R: RouteType> UrlMatcherGroup<R> {
    /// Create a group from matchers, keeping their order.
    pub fn new(matchers: Vec<UrlMatcher<R>>) -> Self {
        Self { matchers }
    }

    /// A group with a single matcher for one host.
    pub fn host<F>(host: impl Into<String>, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(vec![UrlMatcher::host(host, map_paths)])
    }

    /// A group with a single matcher for one scheme.
    pub fn scheme<F>(scheme: impl Into<String>, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(vec![UrlMatcher::scheme(scheme, map_paths)])
    }

    /// A group with a single matcher for some hosts and schemes.
    pub fn group<F>(hosts: StringMatcher, schemes: StringMatcher, map_paths: F) -> Self
    where
        F: FnOnce(&mut UrlPathMapper<R>),
    {
        Self::new(vec![UrlMatcher::group(hosts, schemes, map_paths)])
    }

    /// Append a matcher. It is tried after every matcher already in the group.
    pub fn with(mut self, matcher: UrlMatcher<R>) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// The matchers, in the order they are tried.
    pub fn matchers(&self) -> &[UrlMatcher<R>] {
        &self.matchers
    }

    /// Find the route for a URL.
    ///
    /// Returns `Ok(None)` if no matcher accepts the URL and path. A factory
    /// error from the first matching pattern is returned as-is.
    pub fn find_match(&self, url: &Url) -> Result<Option<R>> {
        for matcher in &self.matchers {
            if let Some(route) = matcher.match_url(url)? {
                debug_log!("Matched URL '{}' to route '{}'", url, route.name());
                return Ok(Some(route));
            }
        }

        debug_log!("No route registered for URL '{}'", url);
        Ok(None)
    }
}

impl<R: RouteType> Default for UrlMatcherGroup<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Path → route registry for one URL matcher.
//!
//! Static mappings (factories that do not need the URL) are always tried
//! before dynamic ones, and both lists are tried in registration order.
//!
//! ```
//! use route_navigator::{RouteType, UrlPathMapper};
//! use url::Url;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Shop {
//!     AllProducts,
//!     Category(String),
//! }
//! impl RouteType for Shop {}
//!
//! let mut paths = UrlPathMapper::new();
//! paths.map("products/{category}", |url| Ok(Shop::Category(url.path("category")?.into())));
//! paths.map_static("products/featured", || Ok(Shop::AllProducts));
//!
//! // The static mapping wins even though it was registered second.
//! let url = Url::parse("https://shop.example/products/featured").unwrap();
//! assert_eq!(paths.match_url(&url).unwrap(), Some(Shop::AllProducts));
//! ```

use crate::error::Result;
use crate::matching::PathPattern;
use crate::params::MatchedUrl;
use crate::route::RouteType;
use crate::trace_log;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Factory for a path that needs nothing from the URL.
pub type StaticPathMapping<R> = Arc<dyn Fn() -> Result<R> + Send + Sync>;

/// Factory for a path that reads parameters from the matched URL.
pub type DynamicPathMapping<R> = Arc<dyn Fn(&MatchedUrl) -> Result<R> + Send + Sync>;

/// Ordered registry of path patterns and their route factories.
pub struct UrlPathMapper<R> {
    static_paths: Vec<(PathPattern, StaticPathMapping<R>)>,
    dynamic_paths: Vec<(PathPattern, DynamicPathMapping<R>)>,
}

impl<R: RouteType> UrlPathMapper<R> {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self {
            static_paths: Vec::new(),
            dynamic_paths: Vec::new(),
        }
    }

    /// Map a path to a route built from the [`MatchedUrl`].
    pub fn map<P, F>(&mut self, pattern: P, route: F) -> &mut Self
    where
        P: Into<PathPattern>,
        F: Fn(&MatchedUrl) -> Result<R> + Send + Sync + 'static,
    {
        self.dynamic_paths.push((pattern.into(), Arc::new(route)));
        self
    }

    /// Map a path to a route that does not depend on the URL.
    pub fn map_static<P, F>(&mut self, pattern: P, route: F) -> &mut Self
    where
        P: Into<PathPattern>,
        F: Fn() -> Result<R> + Send + Sync + 'static,
    {
        self.static_paths.push((pattern.into(), Arc::new(route)));
        self
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.static_paths.len() + self.dynamic_paths.len()
    }

    /// Return `true` if nothing has been mapped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a URL's path to a route.
    ///
    /// `Ok(None)` means no pattern matched. Errors come from the factory of
    /// the first matching pattern.
    pub fn match_url(&self, url: &Url) -> Result<Option<R>> {
        let components = path_components(url);

        if let Some((pattern, route)) = self
            .static_paths
            .iter()
            .find(|(pattern, _)| pattern.matches(&components))
        {
            trace_log!("'{}' matched static pattern '{}'", url.path(), pattern);
            return route().map(Some);
        }

        for (pattern, route) in &self.dynamic_paths {
            if let Some(captures) = pattern.match_components(&components) {
                trace_log!("'{}' matched dynamic pattern '{}'", url.path(), pattern);
                return route(&MatchedUrl::new(url.clone(), captures)).map(Some);
            }
        }

        Ok(None)
    }
}

impl<R: RouteType> Default for UrlPathMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for UrlPathMapper<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statics: Vec<_> = self.static_paths.iter().map(|(p, _)| p.to_string()).collect();
        let dynamics: Vec<_> = self.dynamic_paths.iter().map(|(p, _)| p.to_string()).collect();
        f.debug_struct("UrlPathMapper")
            .field("static_paths", &statics)
            .field("dynamic_paths", &dynamics)
            .finish()
    }
}

/// Non-empty, undecoded path components of a URL.
pub fn path_components(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

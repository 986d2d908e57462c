//! Route definitions.
//!
//! Applications describe their destinations as a value type (usually an
//! enum) implementing [`RouteType`]. The router never inspects a route beyond
//! its [`name`](RouteType::name) and the equality policy below; turning it
//! into a node is the [`RouteHandler`](crate::RouteHandler)'s job.
//!
//! # Example
//!
//! ```
//! use route_navigator::{RouteType, UrlMatcherGroup};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum AppRoute {
//!     Home,
//!     Profile { id: i64 },
//! }
//!
//! impl RouteType for AppRoute {
//!     fn register_urls() -> Option<UrlMatcherGroup<Self>> {
//!         Some(UrlMatcherGroup::host("example.com", |paths| {
//!             paths.map_static("/", || Ok(AppRoute::Home));
//!             paths.map("users/{id}", |url| Ok(AppRoute::Profile { id: url.path_int("id")? }));
//!         }))
//!     }
//! }
//!
//! assert_eq!(AppRoute::Profile { id: 3 }.name(), "Profile");
//! assert!(AppRoute::Profile { id: 3 }.same_route(&AppRoute::Profile { id: 4 }));
//! ```

use crate::url_matcher::UrlMatcherGroup;
use std::fmt::Debug;

/// A symbolic destination in the application.
pub trait RouteType: Clone + Debug + PartialEq + Sized + 'static {
    /// When `true`, two routes are the same only if their parameters are equal
    /// too (compared with `PartialEq`). When `false` (the default), routes
    /// with the same [`name`](Self::name) are the same route.
    const UNIQUE_ON_PARAMETERS: bool = false;

    /// Stable identifier of the route variant.
    ///
    /// Defaults to [`base_name`].
    fn name(&self) -> String {
        base_name(self)
    }

    /// Compare two routes using this type's equality policy.
    fn same_route(&self, other: &Self) -> bool {
        if Self::UNIQUE_ON_PARAMETERS {
            self == other
        } else {
            self.name() == other.name()
        }
    }

    /// URL mappings for this route type. Defaults to none.
    fn register_urls() -> Option<UrlMatcherGroup<Self>> {
        None
    }
}

/// The variant tag of a value, taken from its `Debug` output.
///
/// `Profile { id: 3 }`, `Profile(3)` and `Profile` all yield `"Profile"`.
pub fn base_name<T: Debug + ?Sized>(value: &T) -> String {
    let debug = format!("{value:?}");
    debug
        .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Screen {
        Home,
        Profile(i64),
        Settings { section: String },
    }

    impl RouteType for Screen {}

    #[derive(Debug, Clone, PartialEq)]
    enum Document {
        Page(u32),
    }

    impl RouteType for Document {
        const UNIQUE_ON_PARAMETERS: bool = true;
    }

    #[test]
    fn test_base_name() {
        assert_eq!(Screen::Home.name(), "Home");
        assert_eq!(Screen::Profile(7).name(), "Profile");
        assert_eq!(
            Screen::Settings {
                section: "privacy".into()
            }
            .name(),
            "Settings"
        );
    }

    #[test]
    fn test_same_route_by_name() {
        assert!(Screen::Profile(1).same_route(&Screen::Profile(2)));
        assert!(!Screen::Profile(1).same_route(&Screen::Home));
    }

    #[test]
    fn test_same_route_on_parameters() {
        assert!(Document::Page(1).same_route(&Document::Page(1)));
        assert!(!Document::Page(1).same_route(&Document::Page(2)));
    }

    #[test]
    fn test_no_urls_by_default() {
        assert!(Screen::register_urls().is_none());
    }
}

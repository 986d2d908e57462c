//! # Route Navigator
//!
//! Route resolution and navigation-tree reconciliation for UI applications:
//!
//! - **URL Matching** - Map deep links and universal links to typed routes
//!   with scheme/host filters and `{param}` / `*` path patterns
//! - **Typed Parameters** - Read path and query parameters as strings,
//!   integers or any `FromStr` type
//! - **Reconciliation** - Navigate to a node that is already on screen by
//!   dismissing modals, switching tabs and popping stacks
//! - **Transitions** - Push, replace, modal, inferred, delegate-backed custom
//!   transitions and application-supplied transition closures
//! - **Toolkit Agnostic** - The UI tree is reached through the
//!   [`PresentationNode`] trait; an in-memory [`headless`] toolkit is included
//!
//! # Quick Start
//!
//! ```
//! use route_navigator::headless::{HeadlessNode, HeadlessTree};
//! use route_navigator::{handler_fn, RouteTransition, RouteType, Router, UrlMatcherGroup};
//! use url::Url;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum AppRoute {
//!     Inbox,
//!     Message(i64),
//!     Compose,
//! }
//!
//! impl RouteType for AppRoute {
//!     fn register_urls() -> Option<UrlMatcherGroup<Self>> {
//!         Some(UrlMatcherGroup::scheme("mail", |paths| {
//!             paths.map_static("inbox", || Ok(AppRoute::Inbox));
//!             paths.map("messages/{id}", |url| Ok(AppRoute::Message(url.path_int("id")?)));
//!         }))
//!     }
//! }
//!
//! let tree = HeadlessTree::new();
//! let inbox = tree.leaf("inbox");
//! let root = tree.stack("nav", vec![inbox.clone()]);
//!
//! let factory = tree.clone();
//! let handler = handler_fn(move |route: &AppRoute, _: &HeadlessNode| match route {
//!     AppRoute::Inbox => Ok(inbox.clone()),
//!     AppRoute::Message(id) => Ok(factory.leaf(format!("message-{id}"))),
//!     AppRoute::Compose => Ok(factory.leaf("compose")),
//! })
//! .with_transition(|route| match route {
//!     AppRoute::Compose => RouteTransition::Modal,
//!     _ => RouteTransition::Inferred,
//! });
//!
//! let router = Router::new(handler, root.clone());
//!
//! router.open_url(&Url::parse("mail://open/messages/12").unwrap(), false, None);
//! assert_eq!(root.child_names(), vec!["inbox", "message-12"]);
//!
//! router.navigate_to(AppRoute::Inbox);
//! assert_eq!(root.child_names(), vec!["inbox"]);
//! ```
//!
//! # Errors
//!
//! Every failure is a [`RouterError`] delivered to the navigation's
//! completion. Navigations started without a completion report to the
//! router's [`UnhandledErrorSink`]; by default errors are kept on the router
//! until [`Router::take_unhandled_errors`] is called.
//!
//! # Logging
//!
//! Logging goes through the `log` crate by default. Enable the `tracing`
//! feature (and disable default features) to log through `tracing` instead.

#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Error handling
pub mod error;

// URL matching
pub mod mapper;
pub mod matching;
pub mod params;
pub mod string_matcher;
pub mod url_matcher;

// Routes and handlers
pub mod handler;
pub mod route;
pub mod transition;

// Presentation tree
pub mod headless;
pub mod node;
pub mod tree;

// Navigation
pub mod activity;
pub mod navigator;
pub mod router;

// Re-export main types for convenient access
pub use activity::{ActivityType, UserActivity};
pub use error::{CollectedErrors, Result, RouterError, UnhandledErrorSink};
pub use handler::{
    handler_fn, CustomTransitionDelegate, FnRouteHandler, NavigationCompletion, RouteHandler,
};
pub use mapper::UrlPathMapper;
pub use matching::{PathPattern, SegmentMatcher};
pub use navigator::{NavigationRequest, Navigator};
pub use node::{NodeCompletion, NodeKind, PresentationNode};
pub use params::MatchedUrl;
pub use route::RouteType;
pub use router::{Router, RouterBuilder, RouterConfig};
pub use string_matcher::StringMatcher;
pub use transition::{RouteTransition, TransitionFn};
pub use tree::NodeRelations;
pub use url_matcher::{UrlMatcher, UrlMatcherGroup};

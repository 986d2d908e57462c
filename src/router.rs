//! The router: the entry point applications talk to.
//!
//! A [`Router`] owns the collaborators a navigation needs (route handler,
//! root node, custom transition delegate, URL matchers, error sink) and hands
//! them to the [`Navigator`] for every call to [`Router::navigate`],
//! [`Router::open_url`] or [`Router::continue_activity`].
//!
//! Navigations are serialised: one issued while another is still running is
//! queued and starts when the previous one completes.
//!
//! # Example
//!
//! ```
//! use route_navigator::headless::{HeadlessNode, HeadlessTree};
//! use route_navigator::{handler_fn, Router, RouteType, UrlMatcherGroup};
//! use url::Url;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Home,
//!     Profile(i64),
//! }
//!
//! impl RouteType for Route {
//!     fn register_urls() -> Option<UrlMatcherGroup<Self>> {
//!         Some(UrlMatcherGroup::host("example.com", |paths| {
//!             paths.map("users/{id}", |url| Ok(Route::Profile(url.path_int("id")?)));
//!         }))
//!     }
//! }
//!
//! let tree = HeadlessTree::new();
//! let home = tree.leaf("home");
//! let root = tree.stack("nav", vec![home.clone()]);
//!
//! let factory = tree.clone();
//! let router = Router::builder(handler_fn(move |route: &Route, _: &HeadlessNode| match route {
//!     Route::Home => Ok(home.clone()),
//!     Route::Profile(id) => Ok(factory.leaf(format!("profile-{id}"))),
//! }))
//! .root(root.clone())
//! .build();
//!
//! let url = Url::parse("https://example.com/users/42").unwrap();
//! assert!(router.open_url(&url, false, None));
//! assert_eq!(root.child_names(), vec!["home", "profile-42"]);
//!
//! router.navigate_to(Route::Home);
//! assert_eq!(root.child_names(), vec!["home"]);
//! assert!(router.take_unhandled_errors().is_empty());
//! ```

use crate::activity::UserActivity;
use crate::error::{CollectedErrors, Result, RouterError, UnhandledErrorSink};
use crate::handler::{CustomTransitionDelegate, NavigationCompletion, RouteHandler};
use crate::navigator::{NavigationRequest, Navigator};
use crate::node::PresentationNode;
use crate::route::RouteType;
use crate::url_matcher::UrlMatcherGroup;
use crate::{debug_log, info_log, trace_log, warn_log};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use url::Url;

// ============================================================================
// Configuration
// ============================================================================

/// Runtime options of a [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Animation flag used by [`Router::navigate_to`] and
    /// [`Router::continue_activity`].
    pub animated: bool,
    /// Queue navigations issued while another one is running. When `false`,
    /// every navigation starts immediately.
    pub serialize_navigations: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            animated: true,
            serialize_navigations: true,
        }
    }
}

impl RouterConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default animation flag.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Enable or disable navigation queueing.
    #[must_use]
    pub fn serialize_navigations(mut self, serialize: bool) -> Self {
        self.serialize_navigations = serialize;
        self
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Router`]. Created with [`Router::builder`].
pub struct RouterBuilder<R: RouteType, N: PresentationNode> {
    handler: Rc<dyn RouteHandler<R, N>>,
    root: Option<N>,
    custom_delegate: Option<Rc<dyn CustomTransitionDelegate<N>>>,
    url_matchers: Option<UrlMatcherGroup<R>>,
    error_sink: Option<Rc<dyn UnhandledErrorSink>>,
    config: RouterConfig,
}

impl<R: RouteType, N: PresentationNode> RouterBuilder<R, N> {
    /// Set the root node of the presentation tree.
    #[must_use]
    pub fn root(mut self, root: N) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the delegate performing custom transitions.
    #[must_use]
    pub fn custom_transition_delegate(
        mut self,
        delegate: impl CustomTransitionDelegate<N> + 'static,
    ) -> Self {
        self.custom_delegate = Some(Rc::new(delegate));
        self
    }

    /// Use these URL matchers instead of [`RouteType::register_urls`].
    #[must_use]
    pub fn url_matchers(mut self, matchers: UrlMatcherGroup<R>) -> Self {
        self.url_matchers = Some(matchers);
        self
    }

    /// Send errors of navigations without a completion to `sink` instead of
    /// collecting them on the router.
    #[must_use]
    pub fn error_sink(mut self, sink: impl UnhandledErrorSink + 'static) -> Self {
        self.error_sink = Some(Rc::new(sink));
        self
    }

    /// Set the runtime configuration.
    #[must_use]
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the router.
    pub fn build(self) -> Router<R, N> {
        let collected = Rc::new(CollectedErrors::new());
        let error_sink = self
            .error_sink
            .unwrap_or_else(|| collected.clone() as Rc<dyn UnhandledErrorSink>);
        let url_matchers = self.url_matchers.or_else(R::register_urls);

        debug_log!(
            "Router built with {} URL matcher(s), config {:?}",
            url_matchers.as_ref().map_or(0, |group| group.matchers().len()),
            self.config
        );

        Router {
            shared: Rc::new(Shared {
                handler: self.handler,
                root: RefCell::new(self.root),
                custom_delegate: RefCell::new(self.custom_delegate),
                url_matchers,
                error_sink,
                collected,
                config: self.config,
                navigator: Navigator::new(),
                in_flight: Cell::new(0),
                draining: Cell::new(false),
                queue: RefCell::new(VecDeque::new()),
                navigation_id: Cell::new(0),
            }),
        }
    }
}

impl<R: RouteType, N: PresentationNode> fmt::Debug for RouterBuilder<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("root", &self.root)
            .field("custom_delegate", &self.custom_delegate.is_some())
            .field("url_matchers", &self.url_matchers.is_some())
            .field("error_sink", &self.error_sink.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Router
// ============================================================================

struct PendingNavigation<R> {
    route: R,
    animated: bool,
    completion: Option<NavigationCompletion>,
}

struct Shared<R: RouteType, N: PresentationNode> {
    handler: Rc<dyn RouteHandler<R, N>>,
    root: RefCell<Option<N>>,
    custom_delegate: RefCell<Option<Rc<dyn CustomTransitionDelegate<N>>>>,
    url_matchers: Option<UrlMatcherGroup<R>>,
    error_sink: Rc<dyn UnhandledErrorSink>,
    collected: Rc<CollectedErrors>,
    config: RouterConfig,
    navigator: Navigator,
    /// Navigations started and not yet completed.
    in_flight: Cell<usize>,
    draining: Cell<bool>,
    queue: RefCell<VecDeque<PendingNavigation<R>>>,
    /// Incremented for every navigation that starts.
    navigation_id: Cell<usize>,
}

/// Navigates a presentation tree to routes and URLs.
///
/// Cloning a router yields another handle onto the same router.
pub struct Router<R: RouteType, N: PresentationNode> {
    shared: Rc<Shared<R, N>>,
}

impl<R: RouteType, N: PresentationNode> Clone for Router<R, N> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<R: RouteType, N: PresentationNode> Router<R, N> {
    /// Start building a router around a route handler.
    pub fn builder(handler: impl RouteHandler<R, N> + 'static) -> RouterBuilder<R, N> {
        RouterBuilder {
            handler: Rc::new(handler),
            root: None,
            custom_delegate: None,
            url_matchers: None,
            error_sink: None,
            config: RouterConfig::default(),
        }
    }

    /// A router with default configuration.
    pub fn new(handler: impl RouteHandler<R, N> + 'static, root: N) -> Self {
        Self::builder(handler).root(root).build()
    }

    /// The current root node.
    pub fn root(&self) -> Option<N> {
        self.shared.root.borrow().clone()
    }

    /// Replace the root node. Applies to navigations that start afterwards.
    pub fn set_root(&self, root: Option<N>) {
        *self.shared.root.borrow_mut() = root;
    }

    /// Replace the custom transition delegate.
    pub fn set_custom_transition_delegate(&self, delegate: Option<Rc<dyn CustomTransitionDelegate<N>>>) {
        *self.shared.custom_delegate.borrow_mut() = delegate;
    }

    /// Runtime configuration.
    pub fn config(&self) -> RouterConfig {
        self.shared.config
    }

    /// Navigate to `route`.
    ///
    /// `completion` receives the outcome once the tree has settled. Without a
    /// completion, failures go to the router's [`UnhandledErrorSink`].
    pub fn navigate(&self, route: R, animated: bool, completion: Option<NavigationCompletion>) {
        self.submit(PendingNavigation {
            route,
            animated,
            completion,
        });
    }

    /// Navigate to `route` with the configured animation flag and no completion.
    pub fn navigate_to(&self, route: R) {
        self.navigate(route, self.shared.config.animated, None);
    }

    /// Open a URL.
    ///
    /// Returns `true` if the URL matched a route and a navigation was issued.
    /// An unmatched URL completes with `Ok(())`; a URL whose route factory
    /// failed completes with that error. Both return `false`.
    pub fn open_url(&self, url: &Url, animated: bool, completion: Option<NavigationCompletion>) -> bool {
        match self.find_route(url) {
            Ok(Some(route)) => {
                info_log!("Opening URL '{}' as route '{}'", url, route.name());
                self.navigate(route, animated, completion);
                true
            }
            Ok(None) => {
                debug_log!("URL '{}' did not match any route", url);
                self.report(completion, Ok(()));
                false
            }
            Err(err) => {
                debug_log!("URL '{}' failed to map to a route: {}", url, err);
                self.report(completion, Err(err));
                false
            }
        }
    }

    /// Resolve a URL to a route without navigating.
    pub fn find_route(&self, url: &Url) -> Result<Option<R>> {
        match &self.shared.url_matchers {
            Some(matchers) => matchers.find_match(url),
            None => Ok(None),
        }
    }

    /// Continue a platform user activity.
    ///
    /// Only web-browsing activities carrying a URL are handled; they are
    /// opened with [`open_url`](Self::open_url). Returns whether the activity
    /// was handled.
    pub fn continue_activity(&self, activity: &UserActivity) -> bool {
        match activity.routable_url() {
            Some(url) => self.open_url(url, self.shared.config.animated, None),
            None => {
                trace_log!("Ignoring activity {:?}", activity.activity_type);
                false
            }
        }
    }

    /// Remove and return the errors collected by the default sink.
    ///
    /// Always empty when a custom sink was configured.
    pub fn take_unhandled_errors(&self) -> Vec<RouterError> {
        self.shared.collected.take()
    }

    /// `true` while a navigation is running.
    pub fn is_navigating(&self) -> bool {
        self.shared.in_flight.get() > 0
    }

    /// Navigations waiting for the running one to finish.
    pub fn pending_navigations(&self) -> usize {
        self.shared.queue.borrow().len()
    }

    fn submit(&self, pending: PendingNavigation<R>) {
        if !self.shared.config.serialize_navigations {
            self.start(pending);
            return;
        }

        if self.is_navigating() {
            debug_log!(
                "Queueing navigation to '{}' behind {} running",
                pending.route.name(),
                self.shared.in_flight.get()
            );
        }
        self.shared.queue.borrow_mut().push_back(pending);
        self.drain();
    }

    /// Start queued navigations until one is left running or the queue is
    /// empty.
    fn drain(&self) {
        if self.shared.draining.replace(true) {
            return;
        }
        while !self.is_navigating() {
            let next = self.shared.queue.borrow_mut().pop_front();
            match next {
                Some(pending) => self.start(pending),
                None => break,
            }
        }
        self.shared.draining.set(false);
    }

    fn start(&self, pending: PendingNavigation<R>) {
        let shared = &self.shared;
        let id = shared.navigation_id.get() + 1;
        shared.navigation_id.set(id);
        shared.in_flight.set(shared.in_flight.get() + 1);

        debug_log!("Navigation #{} to '{}' started", id, pending.route.name());

        let request = NavigationRequest {
            route: pending.route,
            handler: Rc::clone(&shared.handler),
            root: self.root(),
            custom_delegate: shared.custom_delegate.borrow().clone(),
            animated: pending.animated,
        };

        let router = self.clone();
        let caller = pending.completion;
        shared.navigator.navigate(
            request,
            Box::new(move |result| {
                debug_log!("Navigation #{} finished: {:?}", id, result);
                router.report(caller, result);
                router.finish();
            }),
        );
    }

    fn finish(&self) {
        let in_flight = self.shared.in_flight.get();
        self.shared.in_flight.set(in_flight.saturating_sub(1));
        if self.shared.config.serialize_navigations {
            self.drain();
        }
    }

    fn report(&self, completion: Option<NavigationCompletion>, result: Result<()>) {
        match (completion, result) {
            (Some(completion), result) => completion(result),
            (None, Ok(())) => {}
            (None, Err(err)) => {
                warn_log!("Unhandled navigation error: {}", err);
                self.shared.error_sink.received(err);
            }
        }
    }
}

impl<R: RouteType, N: PresentationNode> fmt::Debug for Router<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("root", &self.shared.root.borrow())
            .field("config", &self.shared.config)
            .field("in_flight", &self.shared.in_flight.get())
            .field("queued", &self.shared.queue.borrow().len())
            .field("unhandled_errors", &self.shared.collected.len())
            .finish_non_exhaustive()
    }
}

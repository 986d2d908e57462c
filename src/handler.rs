//! Route handlers and custom transition delegates.
//!
//! The router asks a [`RouteHandler`] two things about a route: which node
//! shows it, and which [`RouteTransition`] puts that node on screen. Handlers
//! can be written as a type implementing the trait or built from closures
//! with [`handler_fn`].
//!
//! ```
//! use route_navigator::headless::{HeadlessNode, HeadlessTree};
//! use route_navigator::{handler_fn, RouteHandler, RouteTransition, RouteType};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Home,
//!     Compose,
//! }
//! impl RouteType for Route {}
//!
//! let tree = HeadlessTree::new();
//! let factory = tree.clone();
//! let handler = handler_fn(move |route: &Route, _current: &HeadlessNode| {
//!     Ok(factory.leaf(route.name()))
//! })
//! .with_transition(|route| match route {
//!     Route::Compose => RouteTransition::Modal,
//!     _ => RouteTransition::Inferred,
//! });
//!
//! assert_eq!(handler.transition(&Route::Compose), RouteTransition::Modal);
//! assert_eq!(handler.resolve(&Route::Home, &tree.leaf("root")).unwrap().name(), "Home");
//! ```

use crate::error::{Result, RouterError};
use crate::node::PresentationNode;
use crate::route::RouteType;
use crate::transition::RouteTransition;
use std::fmt;
use std::marker::PhantomData;

/// Receives the outcome of a navigation, exactly once.
pub type NavigationCompletion = Box<dyn FnOnce(Result<()>)>;

/// Maps routes to nodes and transitions.
pub trait RouteHandler<R: RouteType, N: PresentationNode> {
    /// Build or locate the node for `route`.
    ///
    /// `current` is the node currently on top of the tree. Returning an
    /// existing node from the tree makes the router navigate back to it.
    /// Errors are handed to the navigation's completion unchanged.
    fn resolve(&self, route: &R, _current: &N) -> Result<N> {
        Err(RouterError::RouteNotConfigured { route: route.name() })
    }

    /// The transition used to show `route`. Defaults to
    /// [`RouteTransition::Inferred`].
    fn transition(&self, _route: &R) -> RouteTransition<N> {
        RouteTransition::Inferred
    }
}

/// Build a [`RouteHandler`] from a resolve closure.
pub fn handler_fn<R, N, F>(resolve: F) -> FnRouteHandler<R, N, F>
where
    R: RouteType,
    N: PresentationNode,
    F: Fn(&R, &N) -> Result<N>,
{
    FnRouteHandler {
        resolve,
        transition: None,
        _node: PhantomData,
    }
}

/// A [`RouteHandler`] made of closures. See [`handler_fn`].
pub struct FnRouteHandler<R, N, F> {
    resolve: F,
    transition: Option<Box<dyn Fn(&R) -> RouteTransition<N>>>,
    _node: PhantomData<fn(&N) -> N>,
}

impl<R, N, F> FnRouteHandler<R, N, F>
where
    R: RouteType,
    N: PresentationNode,
    F: Fn(&R, &N) -> Result<N>,
{
    /// Choose the transition per route instead of always inferring it.
    #[must_use]
    pub fn with_transition(
        mut self,
        transition: impl Fn(&R) -> RouteTransition<N> + 'static,
    ) -> Self {
        self.transition = Some(Box::new(transition));
        self
    }
}

impl<R, N, F> RouteHandler<R, N> for FnRouteHandler<R, N, F>
where
    R: RouteType,
    N: PresentationNode,
    F: Fn(&R, &N) -> Result<N>,
{
    fn resolve(&self, route: &R, current: &N) -> Result<N> {
        (self.resolve)(route, current)
    }

    fn transition(&self, route: &R) -> RouteTransition<N> {
        self.transition
            .as_ref()
            .map_or(RouteTransition::Inferred, |transition| transition(route))
    }
}

impl<R, N, F> fmt::Debug for FnRouteHandler<R, N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRouteHandler")
            .field("custom_transition", &self.transition.is_some())
            .finish_non_exhaustive()
    }
}

/// Performs [`RouteTransition::Custom`] transitions.
pub trait CustomTransitionDelegate<N: PresentationNode> {
    /// Show `to` starting from `from`, then call `completion` exactly once.
    fn perform_transition(
        &self,
        to: &N,
        from: &N,
        transition: &RouteTransition<N>,
        animated: bool,
        completion: NavigationCompletion,
    );
}

impl<N, F> CustomTransitionDelegate<N> for F
where
    N: PresentationNode,
    F: Fn(&N, &N, &RouteTransition<N>, bool, NavigationCompletion),
{
    fn perform_transition(
        &self,
        to: &N,
        from: &N,
        transition: &RouteTransition<N>,
        animated: bool,
        completion: NavigationCompletion,
    ) {
        self(to, from, transition, animated, completion);
    }
}

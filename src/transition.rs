//! Route transitions
//!
//! A [`RouteTransition`] is the step used to put a destination node on screen
//! once the navigator has found a source. The built-in strategies are unit
//! variants; applications can also supply their own step as a closure with
//! [`RouteTransition::new`], or hand the work to the router's
//! [`CustomTransitionDelegate`] with [`RouteTransition::custom`].
//!
//! Executing a transition always ends in exactly one call to its completion.
//!
//! Equality is identity: two built-ins are equal when they are the same
//! variant, while closure and custom transitions are only equal to clones of
//! themselves.
//!
//! ```
//! use route_navigator::headless::{HeadlessNode, HeadlessTree};
//! use route_navigator::{NavigationCompletion, PresentationNode, RouteTransition};
//!
//! let set_root = RouteTransition::new(
//!     |source: &HeadlessNode, destination, animated, completion: NavigationCompletion| {
//!         source.set_stack(vec![destination], animated, Box::new(move || completion(Ok(()))));
//!     },
//! );
//!
//! assert_eq!(set_root, set_root.clone());
//! assert_ne!(set_root, RouteTransition::new(|_: &HeadlessNode, _, _, c: NavigationCompletion| c(Ok(()))));
//! assert_ne!(RouteTransition::<HeadlessNode>::custom("flip"), RouteTransition::custom("flip"));
//! assert_eq!(RouteTransition::<HeadlessNode>::Push, RouteTransition::Push);
//!
//! let tree = HeadlessTree::new();
//! let nav = tree.stack("nav", vec![tree.leaf("a"), tree.leaf("b")]);
//! set_root.execute(&nav, tree.leaf("c"), false, None, Box::new(|_: route_navigator::Result<()>| {}));
//! assert_eq!(nav.child_names(), vec!["c"]);
//! ```

use crate::debug_log;
use crate::error::RouterError;
use crate::handler::{CustomTransitionDelegate, NavigationCompletion};
use crate::node::{NodeCompletion, PresentationNode};
use std::fmt;
use std::rc::Rc;

/// A transition step: `(source, destination, animated, completion)`.
pub type TransitionFn<N> = dyn Fn(&N, N, bool, NavigationCompletion);

/// How a destination is shown.
pub enum RouteTransition<N> {
    /// Push onto the source stack, or pop back to the destination if it is
    /// already in the stack.
    Push,
    /// Replace the source stack's content with the destination, or pop back
    /// to it if it is already in the stack.
    Replace,
    /// Present the destination modally over the source.
    Modal,
    /// Pick [`Modal`](Self::Modal), [`Replace`](Self::Replace) or
    /// [`Push`](Self::Push) from the shape of the tree.
    Inferred,
    /// Performed by the router's [`CustomTransitionDelegate`].
    Custom(Rc<str>),
    /// Performed by an application-supplied step.
    Closure(Rc<TransitionFn<N>>),
}

impl<N> RouteTransition<N> {
    /// A transition that runs `step`.
    ///
    /// `step` receives the source (already normalised to its stack container
    /// when it has one), the destination and the animation flag, and must
    /// call the completion exactly once.
    pub fn new(step: impl Fn(&N, N, bool, NavigationCompletion) + 'static) -> Self {
        Self::Closure(Rc::new(step))
    }

    /// A custom transition with the given identifier, performed by the
    /// router's delegate.
    pub fn custom(identifier: impl Into<Rc<str>>) -> Self {
        Self::Custom(identifier.into())
    }

    /// Identifier of the transition. For custom transitions this is the
    /// identifier they were created with.
    pub fn name(&self) -> &str {
        match self {
            Self::Push => "push",
            Self::Replace => "replace",
            Self::Modal => "modal",
            Self::Inferred => "inferred",
            Self::Custom(identifier) => identifier,
            Self::Closure(_) => "closure",
        }
    }

    /// Return `true` for [`Custom`](Self::Custom) transitions.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl<N: PresentationNode> RouteTransition<N> {
    /// Execute the transition from `source` to `destination`.
    ///
    /// `source` is expected to already be normalised to its stack container
    /// when it has one. `delegate` is only consulted for custom transitions.
    pub fn execute(
        &self,
        source: &N,
        destination: N,
        animated: bool,
        delegate: Option<&dyn CustomTransitionDelegate<N>>,
        completion: NavigationCompletion,
    ) {
        debug_log!(
            "Executing '{}' transition from {:?} to {:?}",
            self,
            source,
            destination
        );

        match self {
            Self::Push => push(source, destination, animated, completion),
            Self::Replace => replace(source, destination, animated, completion),
            Self::Modal => modal(source, destination, animated, completion),
            Self::Inferred => {
                if !source.is_stack() || destination.is_stack() {
                    modal(source, destination, animated, completion);
                } else if destination
                    .stack_container()
                    .is_some_and(|stack| stack.is_same_node(source))
                {
                    replace(source, destination, animated, completion);
                } else {
                    push(source, destination, animated, completion);
                }
            }
            Self::Custom(_) => match delegate {
                Some(delegate) => {
                    delegate.perform_transition(&destination, source, self, animated, completion);
                }
                None => completion(Err(RouterError::MissingCustomTransitionDelegate)),
            },
            Self::Closure(step) => step(source, destination, animated, completion),
        }
    }
}

impl<N> Default for RouteTransition<N> {
    fn default() -> Self {
        Self::Inferred
    }
}

impl<N> Clone for RouteTransition<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Push => Self::Push,
            Self::Replace => Self::Replace,
            Self::Modal => Self::Modal,
            Self::Inferred => Self::Inferred,
            Self::Custom(identifier) => Self::Custom(Rc::clone(identifier)),
            Self::Closure(step) => Self::Closure(Rc::clone(step)),
        }
    }
}

impl<N> PartialEq for RouteTransition<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Push, Self::Push)
            | (Self::Replace, Self::Replace)
            | (Self::Modal, Self::Modal)
            | (Self::Inferred, Self::Inferred) => true,
            (Self::Custom(a), Self::Custom(b)) => Rc::ptr_eq(a, b),
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<N> Eq for RouteTransition<N> {}

impl<N> fmt::Debug for RouteTransition<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("Push"),
            Self::Replace => f.write_str("Replace"),
            Self::Modal => f.write_str("Modal"),
            Self::Inferred => f.write_str("Inferred"),
            Self::Custom(identifier) => f.debug_tuple("Custom").field(identifier).finish(),
            Self::Closure(_) => f.write_str("Closure(..)"),
        }
    }
}

impl<N> fmt::Display for RouteTransition<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn push<N: PresentationNode>(
    source: &N,
    destination: N,
    animated: bool,
    completion: NavigationCompletion,
) {
    if !source.is_stack() {
        completion(Err(RouterError::MissingRequiredContainer { transition: "push" }));
        return;
    }

    match prefix_ending_at(source, &destination) {
        Some(nodes) => source.set_stack(nodes, animated, succeed(completion)),
        None => source.push(destination, animated, succeed(completion)),
    }
}

fn replace<N: PresentationNode>(
    source: &N,
    destination: N,
    animated: bool,
    completion: NavigationCompletion,
) {
    if !source.is_stack() {
        completion(Err(RouterError::MissingRequiredContainer {
            transition: "replace",
        }));
        return;
    }

    let nodes = prefix_ending_at(source, &destination).unwrap_or_else(|| vec![destination]);
    source.set_stack(nodes, animated, succeed(completion));
}

fn modal<N: PresentationNode>(
    source: &N,
    destination: N,
    animated: bool,
    completion: NavigationCompletion,
) {
    source.present(destination, animated, succeed(completion));
}

/// The stack's children up to and including `node`, if it is one of them.
fn prefix_ending_at<N: PresentationNode>(stack: &N, node: &N) -> Option<Vec<N>> {
    let mut children = stack.children();
    let index = children.iter().position(|child| child.is_same_node(node))?;
    children.truncate(index + 1);
    Some(children)
}

fn succeed(completion: NavigationCompletion) -> NodeCompletion {
    Box::new(move || completion(Ok(())))
}

//! Error handling for the router.
//!
//! Every failure that can end a `navigate` or `open_url` call is a
//! [`RouterError`]. None of them are retried automatically; they are handed to
//! the caller's completion, or to the router's [`UnhandledErrorSink`] when the
//! caller did not supply one.
//!
//! # Examples
//!
//! ```
//! use route_navigator::RouterError;
//!
//! let error = RouterError::MissingRequiredContainer { transition: "push" };
//! assert_eq!(
//!     error.to_string(),
//!     "the `push` transition requires a stack container as its source"
//! );
//! assert!(error.recovery_suggestion().is_some());
//! ```

use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

/// Errors that can end a navigation or URL resolution.
#[derive(Debug, Clone, Error)]
pub enum RouterError {
    /// There is no live node to navigate from (the root node is absent).
    #[error("no live source node was found to navigate from")]
    MissingSourceNode,

    /// A push or replace transition was attempted from a node that is not a
    /// stack container.
    #[error("the `{transition}` transition requires a stack container as its source")]
    MissingRequiredContainer {
        /// Name of the transition that needed the container.
        transition: &'static str,
    },

    /// The destination is already live in the tree, but cannot be reached by
    /// closing containers above the current node.
    #[error("the destination is already presented elsewhere and cannot be reached from the current node")]
    UnableToFindRouteToNode,

    /// A custom transition was requested without a delegate to perform it.
    #[error("a custom transition was requested but no custom transition delegate is registered")]
    MissingCustomTransitionDelegate,

    /// The route handler has no destination for this route.
    #[error("route `{route}` has not been configured")]
    RouteNotConfigured {
        /// Name of the route.
        route: String,
    },

    /// A URL factory asked for a path parameter the pattern does not declare.
    #[error("missing required path parameter `{parameter}`")]
    MissingRequiredPathParameter {
        /// Parameter name.
        parameter: String,
    },

    /// A path parameter exists but is not an integer.
    #[error("required integer parameter `{parameter}` was not an integer (received `{value}`)")]
    RequiredIntegerParameterNotAnInteger {
        /// Parameter name.
        parameter: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A path parameter exists but could not be parsed into the requested type.
    #[error("path parameter `{parameter}` could not be parsed (received `{value}`)")]
    InvalidPathParameter {
        /// Parameter name.
        parameter: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The route handler cancelled the navigation.
    #[error("navigation was cancelled")]
    Cancelled,

    /// Any other failure raised by a route handler or URL factory.
    #[error("route handler failed: {0}")]
    Handler(#[source] Arc<dyn StdError + Send + Sync>),
}

impl RouterError {
    /// Wrap an arbitrary error raised by application code.
    pub fn handler<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(error))
    }

    /// Check if this error came from a cancelled navigation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this error was raised while extracting URL parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredPathParameter { .. }
                | Self::RequiredIntegerParameterNotAnInteger { .. }
                | Self::InvalidPathParameter { .. }
        )
    }

    /// A hint describing how the failure might be fixed.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingSourceNode => {
                Some("Make sure the router has a root node before navigating.")
            }
            Self::MissingRequiredContainer { .. } => {
                Some("Nest the current node in a stack container, or use a modal transition.")
            }
            Self::UnableToFindRouteToNode => Some(
                "Return a fresh node from the route handler, or only route to nodes that are \
                 ancestors or container siblings of the current node.",
            ),
            Self::MissingCustomTransitionDelegate => {
                Some("Register a custom transition delegate on the router.")
            }
            Self::RouteNotConfigured { .. } => {
                Some("Implement `RouteHandler::resolve` for this route.")
            }
            Self::MissingRequiredPathParameter { .. } => Some(
                "Declare the parameter in the path pattern, or stop reading it in the URL mapping.",
            ),
            Self::RequiredIntegerParameterNotAnInteger { .. }
            | Self::InvalidPathParameter { .. } => {
                Some("Check the URL that was opened; the parameter value has the wrong format.")
            }
            Self::Cancelled | Self::Handler(_) => None,
        }
    }
}

// ============================================================================
// Unhandled errors
// ============================================================================

/// Receives errors from navigations that were started without a completion.
///
/// Closures taking a [`RouterError`] implement this trait.
pub trait UnhandledErrorSink {
    /// Called once per unhandled error.
    fn received(&self, error: RouterError);
}

impl<F> UnhandledErrorSink for F
where
    F: Fn(RouterError),
{
    fn received(&self, error: RouterError) {
        self(error);
    }
}

/// The default sink: keeps errors until the caller collects them.
#[derive(Default)]
pub struct CollectedErrors {
    errors: RefCell<Vec<RouterError>>,
}

impl CollectedErrors {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every collected error, oldest first.
    pub fn take(&self) -> Vec<RouterError> {
        self.errors.take()
    }

    /// Number of errors waiting to be collected.
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Return `true` if nothing is waiting to be collected.
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }
}

impl UnhandledErrorSink for CollectedErrors {
    fn received(&self, error: RouterError) {
        self.errors.borrow_mut().push(error);
    }
}

impl fmt::Debug for CollectedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectedErrors")
            .field("errors", &self.errors.borrow())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

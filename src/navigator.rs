//! Navigation reconciliation.
//!
//! The [`Navigator`] turns a route into a change of the presentation tree. A
//! navigation runs in three phases:
//!
//! 1. **Resolve**: find the visible top node of the root (the *source*) and
//!    ask the route handler for the *destination* node.
//! 2. **Reconcile**: if the destination already lives in the tree, close
//!    whatever covers it (modals, other tabs) so it can be reached.
//! 3. **Execute**: run the route's [`RouteTransition`](crate::RouteTransition) from the source (or its
//!    stack container) to the destination.
//!
//! Navigating to the node already on top succeeds without touching the tree.
//! The completion is called exactly once, after the last tree mutation has
//! finished.

use crate::debug_log;
use crate::error::RouterError;
use crate::handler::{CustomTransitionDelegate, NavigationCompletion, RouteHandler};
use crate::node::PresentationNode;
use crate::route::RouteType;
use crate::tree::NodeRelations;
use std::fmt;
use std::rc::Rc;

/// Everything a single navigation needs.
pub struct NavigationRequest<R: RouteType, N: PresentationNode> {
    /// Where to go.
    pub route: R,
    /// Resolves the route to a node and a transition.
    pub handler: Rc<dyn RouteHandler<R, N>>,
    /// Root of the presentation tree.
    pub root: Option<N>,
    /// Performs custom transitions.
    pub custom_delegate: Option<Rc<dyn CustomTransitionDelegate<N>>>,
    /// Whether tree changes should animate.
    pub animated: bool,
}

impl<R: RouteType, N: PresentationNode> NavigationRequest<R, N> {
    /// An animated request with no root and no custom delegate.
    pub fn new(route: R, handler: Rc<dyn RouteHandler<R, N>>) -> Self {
        Self {
            route,
            handler,
            root: None,
            custom_delegate: None,
            animated: true,
        }
    }

    /// Set the root node.
    #[must_use]
    pub fn root(mut self, root: N) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the custom transition delegate.
    #[must_use]
    pub fn custom_delegate(mut self, delegate: Rc<dyn CustomTransitionDelegate<N>>) -> Self {
        self.custom_delegate = Some(delegate);
        self
    }

    /// Enable or disable animation.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

impl<R: RouteType, N: PresentationNode> fmt::Debug for NavigationRequest<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("route", &self.route)
            .field("root", &self.root)
            .field("custom_delegate", &self.custom_delegate.is_some())
            .field("animated", &self.animated)
            .finish_non_exhaustive()
    }
}

/// Runs navigations against a presentation tree. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator;

impl Navigator {
    /// Create a navigator.
    pub fn new() -> Self {
        Self
    }

    /// Navigate to `request.route`, calling `completion` once with the outcome.
    pub fn navigate<R, N>(&self, request: NavigationRequest<R, N>, completion: NavigationCompletion)
    where
        R: RouteType,
        N: PresentationNode,
    {
        // Phase 1: source and destination
        let Some(root) = request.root.clone() else {
            completion(Err(RouterError::MissingSourceNode));
            return;
        };
        let source = root.top_node();
        let destination = match request.handler.resolve(&request.route, &source) {
            Ok(destination) => destination,
            Err(err) => {
                debug_log!("Route '{}' failed to resolve: {}", request.route.name(), err);
                completion(Err(err));
                return;
            }
        };
        debug_log!(
            "Navigating to '{}': {:?} -> {:?}",
            request.route.name(),
            source,
            destination
        );

        // Phase 2: reconcile with the live tree
        if is_already_shown(&source, &destination) {
            debug_log!("Already showing {:?}", destination);
            completion(Ok(()));
            return;
        }

        if !destination.is_live_in(&root) {
            perform(request, &source, destination, completion);
            return;
        }

        if !source.has_ancestor(&destination) {
            debug_log!("{:?} is not reachable from {:?}", destination, source);
            completion(Err(RouterError::UnableToFindRouteToNode));
            return;
        }

        if shares_idle_stack(&source, &destination) {
            perform(request, &source, destination, completion);
            return;
        }

        let Some(ancestor) = source.lowest_common_ancestor(&destination) else {
            perform(request, &source, destination, completion);
            return;
        };

        debug_log!("Unwinding to common ancestor {:?}", ancestor);
        let animated = request.animated;
        let anchor = ancestor.clone();
        ancestor.dismiss_presented_if_needed(
            animated,
            Box::new(move || {
                anchor.switch_to_tab_containing(&destination);
                let source = anchor.top_node();
                perform(request, &source, destination, completion);
            }),
        );
    }
}

/// Phase 3: pick and run the transition.
fn perform<R, N>(
    request: NavigationRequest<R, N>,
    source: &N,
    destination: N,
    completion: NavigationCompletion,
) where
    R: RouteType,
    N: PresentationNode,
{
    let transition = request.handler.transition(&request.route);

    if is_already_shown(source, &destination) {
        debug_log!("Already showing {:?}", destination);
        completion(Ok(()));
        return;
    }

    let source = source.stack_container().unwrap_or_else(|| source.clone());
    transition.execute(
        &source,
        destination,
        request.animated,
        request.custom_delegate.as_deref(),
        completion,
    );
}

/// The destination is the source itself or the stack the source is in.
fn is_already_shown<N: PresentationNode>(source: &N, destination: &N) -> bool {
    destination.is_same_node(source)
        || source
            .stack_container()
            .is_some_and(|stack| stack.is_same_node(destination))
}

fn shares_idle_stack<N: PresentationNode>(source: &N, destination: &N) -> bool {
    match (source.stack_container(), destination.stack_container()) {
        (Some(ours), Some(theirs)) => ours.is_same_node(&theirs) && !ours.is_being_presented(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::handler::handler_fn;
    use crate::headless::{HeadlessNode, HeadlessTree, Mutation};
    use crate::transition::RouteTransition;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    enum Screen {
        Named(&'static str),
        Broken,
    }

    impl RouteType for Screen {}

    type Outcome = Rc<RefCell<Option<Result<()>>>>;

    struct Fixture {
        tree: HeadlessTree,
        root: HeadlessNode,
        nodes: Rc<RefCell<HashMap<&'static str, HeadlessNode>>>,
    }

    impl Fixture {
        /// tabs [ home_nav [home, detail], profile_nav [profile] ]
        fn new() -> Self {
            let tree = HeadlessTree::new();
            let home = tree.leaf("home");
            let detail = tree.leaf("detail");
            let profile = tree.leaf("profile");
            let home_nav = tree.stack("home_nav", vec![home.clone(), detail.clone()]);
            let profile_nav = tree.stack("profile_nav", vec![profile.clone()]);
            let root = tree.tabs("tabs", vec![home_nav.clone(), profile_nav]);

            let nodes = HashMap::from([
                ("home", home),
                ("detail", detail),
                ("profile", profile),
                ("home_nav", home_nav),
            ]);
            Self {
                tree,
                root,
                nodes: Rc::new(RefCell::new(nodes)),
            }
        }

        fn node(&self, name: &'static str) -> HeadlessNode {
            self.nodes.borrow()[name].clone()
        }

        fn handler(&self, transition: RouteTransition<HeadlessNode>) -> Rc<dyn RouteHandler<Screen, HeadlessNode>> {
            let nodes = self.nodes.clone();
            let tree = self.tree.clone();
            Rc::new(
                handler_fn(move |route: &Screen, _: &HeadlessNode| match route {
                    Screen::Named(name) => Ok(nodes
                        .borrow_mut()
                        .entry(*name)
                        .or_insert_with(|| tree.leaf(*name))
                        .clone()),
                    Screen::Broken => Err(RouterError::Cancelled),
                })
                .with_transition(move |_| transition.clone()),
            )
        }

        fn navigate(&self, screen: Screen, transition: RouteTransition<HeadlessNode>) -> Result<()> {
            let outcome: Outcome = Rc::default();
            let slot = outcome.clone();
            let request = NavigationRequest::new(screen, self.handler(transition))
                .root(self.root.clone())
                .animated(false);
            Navigator::new().navigate(
                request,
                Box::new(move |result| *slot.borrow_mut() = Some(result)),
            );
            let result = outcome.borrow_mut().take();
            result.expect("completion was not called")
        }
    }

    #[test]
    fn test_missing_root() {
        let fixture = Fixture::new();
        let outcome: Outcome = Rc::default();
        let slot = outcome.clone();
        let request = NavigationRequest::new(
            Screen::Named("home"),
            fixture.handler(RouteTransition::Inferred),
        );
        Navigator.navigate(request, Box::new(move |r| *slot.borrow_mut() = Some(r)));

        assert!(matches!(
            *outcome.borrow(),
            Some(Err(RouterError::MissingSourceNode))
        ));
    }

    #[test]
    fn test_resolve_error_is_passed_through() {
        let fixture = Fixture::new();
        let err = fixture
            .navigate(Screen::Broken, RouteTransition::Inferred)
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(fixture.tree.journal().is_empty());
    }

    #[test]
    fn test_top_node_is_noop() {
        let fixture = Fixture::new();
        fixture
            .navigate(Screen::Named("detail"), RouteTransition::Push)
            .unwrap();
        assert!(fixture.tree.journal().is_empty());
    }

    #[test]
    fn test_own_stack_is_noop() {
        let fixture = Fixture::new();
        fixture
            .navigate(Screen::Named("home_nav"), RouteTransition::Inferred)
            .unwrap();
        assert!(fixture.tree.journal().is_empty());
    }

    #[test]
    fn test_fresh_node_is_pushed() {
        let fixture = Fixture::new();
        fixture
            .navigate(Screen::Named("comments"), RouteTransition::Inferred)
            .unwrap();
        assert_eq!(
            fixture.node("home_nav").child_names(),
            vec!["home", "detail", "comments"]
        );
    }

    #[test]
    fn test_pop_to_node_in_same_stack() {
        let fixture = Fixture::new();
        fixture
            .navigate(Screen::Named("home"), RouteTransition::Push)
            .unwrap();
        assert_eq!(fixture.node("home_nav").child_names(), vec!["home"]);
    }

    #[test]
    fn test_switches_tab() {
        let fixture = Fixture::new();
        fixture
            .navigate(Screen::Named("profile"), RouteTransition::Inferred)
            .unwrap();

        assert!(fixture.root.top_node().is_same_node(&fixture.node("profile")));
        assert_eq!(
            fixture.tree.journal(),
            vec![Mutation::SelectTab {
                tabs: "tabs".into(),
                child: "profile_nav".into()
            }]
        );
    }

    #[test]
    fn test_dismisses_modal_to_reach_node() {
        let fixture = Fixture::new();
        let sheet = fixture.tree.leaf("sheet");
        fixture
            .node("detail")
            .present(sheet, false, Box::new(|| {}));
        fixture.tree.clear_journal();

        fixture
            .navigate(Screen::Named("home"), RouteTransition::Inferred)
            .unwrap();

        let journal = fixture.tree.journal();
        assert!(matches!(journal.first(), Some(Mutation::Dismiss { .. })));
        assert_eq!(fixture.node("home_nav").child_names(), vec!["home"]);
        assert!(fixture.root.top_node().is_same_node(&fixture.node("home")));
    }

    #[test]
    fn test_sideways_modal_is_unreachable() {
        let fixture = Fixture::new();
        let sheet = fixture.tree.leaf("sheet");
        fixture.nodes.borrow_mut().insert("sheet", sheet.clone());
        fixture
            .node("profile")
            .present(sheet, false, Box::new(|| {}));
        fixture.tree.clear_journal();

        let err = fixture
            .navigate(Screen::Named("sheet"), RouteTransition::Inferred)
            .unwrap_err();
        assert!(matches!(err, RouterError::UnableToFindRouteToNode));
        assert!(fixture.tree.journal().is_empty());
    }

    #[test]
    fn test_custom_transition_without_delegate() {
        let fixture = Fixture::new();
        let err = fixture
            .navigate(Screen::Named("fresh"), RouteTransition::custom("fold"))
            .unwrap_err();
        assert!(matches!(err, RouterError::MissingCustomTransitionDelegate));
    }
}

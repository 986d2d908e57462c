//! In-memory presentation toolkit.
//!
//! [`HeadlessTree`] builds trees of [`HeadlessNode`]s (leaves, stacks, tab and
//! split containers) that implement [`PresentationNode`] without any UI. Every
//! mutation the router performs is recorded in a journal, which makes the
//! toolkit useful for tests and for embedders that want to see what a
//! navigation would do before applying it to a real UI.
//!
//! Ownership follows the real toolkits: containers hold their children and
//! presenters hold the node they present; the reverse links are `Weak`.
//!
//! Completions run immediately by default. A tree created with
//! [`HeadlessTree::deferred`] queues them instead, to emulate animations;
//! drive them with [`HeadlessTree::run_until_idle`].
//!
//! # Example
//!
//! ```
//! use route_navigator::headless::{HeadlessTree, Mutation};
//! use route_navigator::PresentationNode;
//!
//! let tree = HeadlessTree::new();
//! let home = tree.leaf("home");
//! let nav = tree.stack("nav", vec![home.clone()]);
//!
//! nav.push(tree.leaf("detail"), true, Box::new(|| {}));
//!
//! assert_eq!(nav.child_names(), vec!["home", "detail"]);
//! assert_eq!(
//!     tree.journal(),
//!     vec![Mutation::Push { stack: "nav".into(), node: "detail".into(), animated: true }]
//! );
//! ```

use crate::node::{NodeCompletion, NodeKind, PresentationNode};
use crate::trace_log;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// A change applied to a headless tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// `presenter` presented `presented` modally.
    Present {
        presenter: String,
        presented: String,
        animated: bool,
    },
    /// `presenter` dismissed `dismissed`.
    Dismiss {
        presenter: String,
        dismissed: String,
        animated: bool,
    },
    /// `node` was pushed onto `stack`.
    Push {
        stack: String,
        node: String,
        animated: bool,
    },
    /// The content of `stack` was replaced.
    SetStack {
        stack: String,
        nodes: Vec<String>,
        animated: bool,
    },
    /// `child` was selected in `tabs`.
    SelectTab { tabs: String, child: String },
}

#[derive(Default)]
struct TreeShared {
    journal: RefCell<Vec<Mutation>>,
    deferred: Cell<bool>,
    pending: RefCell<VecDeque<NodeCompletion>>,
}

impl TreeShared {
    fn record(&self, mutation: Mutation) {
        trace_log!("Headless tree: {:?}", mutation);
        self.journal.borrow_mut().push(mutation);
    }

    fn complete(&self, completion: NodeCompletion) {
        if self.deferred.get() {
            self.pending.borrow_mut().push_back(completion);
        } else {
            completion();
        }
    }
}

/// Factory and journal for a tree of [`HeadlessNode`]s.
#[derive(Clone, Default)]
pub struct HeadlessTree {
    shared: Rc<TreeShared>,
}

impl HeadlessTree {
    /// A tree whose completions run immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree whose completions wait for [`run_until_idle`](Self::run_until_idle).
    pub fn deferred() -> Self {
        let tree = Self::default();
        tree.shared.deferred.set(true);
        tree
    }

    /// Create a leaf node.
    pub fn leaf(&self, name: impl Into<String>) -> HeadlessNode {
        self.node(name.into(), NodeKind::Leaf)
    }

    /// Create a stack container holding `children` (the last one on top).
    pub fn stack(&self, name: impl Into<String>, children: Vec<HeadlessNode>) -> HeadlessNode {
        let stack = self.node(name.into(), NodeKind::Stack);
        stack.replace_children(children);
        stack
    }

    /// Create a tab container; the first child starts selected.
    pub fn tabs(&self, name: impl Into<String>, children: Vec<HeadlessNode>) -> HeadlessNode {
        let tabs = self.node(name.into(), NodeKind::Tab);
        tabs.replace_children(children);
        tabs
    }

    /// Create a split container.
    pub fn split(&self, name: impl Into<String>, children: Vec<HeadlessNode>) -> HeadlessNode {
        let split = self.node(name.into(), NodeKind::Split);
        split.replace_children(children);
        split
    }

    /// Every mutation applied so far, oldest first.
    pub fn journal(&self) -> Vec<Mutation> {
        self.shared.journal.borrow().clone()
    }

    /// Forget the recorded mutations.
    pub fn clear_journal(&self) {
        self.shared.journal.borrow_mut().clear();
    }

    /// Number of completions waiting to run.
    pub fn pending_completions(&self) -> usize {
        self.shared.pending.borrow().len()
    }

    /// Run queued completions, including the ones they queue, until none are
    /// left. Returns how many ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.shared.pending.borrow_mut().pop_front();
            match next {
                Some(completion) => {
                    completion();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    fn node(&self, name: String, kind: NodeKind) -> HeadlessNode {
        HeadlessNode {
            inner: Rc::new(NodeInner {
                name,
                kind,
                tree: self.shared.clone(),
                state: RefCell::default(),
            }),
        }
    }
}

impl fmt::Debug for HeadlessTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessTree")
            .field("deferred", &self.shared.deferred.get())
            .field("journal", &self.shared.journal.borrow().len())
            .field("pending", &self.shared.pending.borrow().len())
            .finish()
    }
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Default)]
struct NodeState {
    parent: Weak<NodeInner>,
    children: Vec<HeadlessNode>,
    selected: Option<usize>,
    presented: Option<HeadlessNode>,
    presenting: Weak<NodeInner>,
    being_presented: bool,
}

struct NodeInner {
    name: String,
    kind: NodeKind,
    tree: Rc<TreeShared>,
    state: RefCell<NodeState>,
}

/// A node of a [`HeadlessTree`].
#[derive(Clone)]
pub struct HeadlessNode {
    inner: Rc<NodeInner>,
}

impl HeadlessNode {
    /// The name given at creation.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Names of the children, in order.
    pub fn child_names(&self) -> Vec<String> {
        self.inner
            .state
            .borrow()
            .children
            .iter()
            .map(|child| child.name().to_string())
            .collect()
    }

    /// The containing node, if any (not the presenting node).
    pub fn parent(&self) -> Option<Self> {
        upgrade(&self.inner.state.borrow().parent)
    }

    fn enclosing(&self, kind: NodeKind) -> Option<Self> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.inner.kind == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    fn detach_from_parent(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        let mut state = parent.inner.state.borrow_mut();
        let selected = state.selected.and_then(|i| state.children.get(i).cloned());
        state.children.retain(|child| !child.is_same_node(self));
        state.selected = reselect(&state.children, selected.as_ref());
        drop(state);
        self.inner.state.borrow_mut().parent = Weak::new();
    }

    fn adopt(&self, child: &Self) {
        let already_ours = child.parent().is_some_and(|p| p.is_same_node(self));
        if !already_ours {
            child.detach_from_parent();
            child.inner.state.borrow_mut().parent = Rc::downgrade(&self.inner);
        }
    }

    fn replace_children(&self, children: Vec<Self>) {
        let old = std::mem::take(&mut self.inner.state.borrow_mut().children);
        for child in &old {
            if !children.iter().any(|c| c.is_same_node(child)) {
                child.inner.state.borrow_mut().parent = Weak::new();
            }
        }
        for child in &children {
            self.adopt(child);
        }

        let mut state = self.inner.state.borrow_mut();
        let selected = state.selected.and_then(|i| old.get(i).cloned());
        state.children = children;
        state.selected = match self.inner.kind {
            NodeKind::Tab => reselect(&state.children, selected.as_ref())
                .or_else(|| (!state.children.is_empty()).then_some(0)),
            _ => None,
        };
    }

    fn dismiss_chain(&self) {
        let presented = self.inner.state.borrow_mut().presented.take();
        if let Some(presented) = presented {
            presented.dismiss_chain();
            let mut state = presented.inner.state.borrow_mut();
            state.presenting = Weak::new();
            state.being_presented = false;
        }
    }
}

fn upgrade(weak: &Weak<NodeInner>) -> Option<HeadlessNode> {
    weak.upgrade().map(|inner| HeadlessNode { inner })
}

fn reselect(children: &[HeadlessNode], selected: Option<&HeadlessNode>) -> Option<usize> {
    let selected = selected?;
    children.iter().position(|child| child.is_same_node(selected))
}

impl fmt::Debug for HeadlessNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.inner.kind, self.inner.name)
    }
}

impl PresentationNode for HeadlessNode {
    fn is_same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn kind(&self) -> NodeKind {
        self.inner.kind
    }

    fn stack_container(&self) -> Option<Self> {
        self.enclosing(NodeKind::Stack)
    }

    fn split_container(&self) -> Option<Self> {
        self.enclosing(NodeKind::Split)
    }

    fn tab_container(&self) -> Option<Self> {
        self.enclosing(NodeKind::Tab)
    }

    fn presenting_node(&self) -> Option<Self> {
        upgrade(&self.inner.state.borrow().presenting)
    }

    fn presented_node(&self) -> Option<Self> {
        self.inner.state.borrow().presented.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.inner.state.borrow().children.clone()
    }

    fn selected_child(&self) -> Option<Self> {
        let state = self.inner.state.borrow();
        state.selected.and_then(|i| state.children.get(i).cloned())
    }

    fn is_being_presented(&self) -> bool {
        self.inner.state.borrow().being_presented
    }

    fn present(&self, node: Self, animated: bool, completion: NodeCompletion) {
        // Presenting over a node that already presents goes on top of the chain.
        let mut presenter = self.clone();
        while let Some(presented) = presenter.presented_node() {
            presenter = presented;
        }

        node.detach_from_parent();
        {
            let mut state = node.inner.state.borrow_mut();
            state.presenting = Rc::downgrade(&presenter.inner);
            state.being_presented = true;
        }
        presenter.inner.state.borrow_mut().presented = Some(node.clone());

        self.inner.tree.record(Mutation::Present {
            presenter: presenter.name().to_string(),
            presented: node.name().to_string(),
            animated,
        });
        self.inner.tree.complete(Box::new(move || {
            node.inner.state.borrow_mut().being_presented = false;
            completion();
        }));
    }

    fn dismiss_presented(&self, animated: bool, completion: NodeCompletion) {
        if let Some(presented) = self.presented_node() {
            self.dismiss_chain();
            self.inner.tree.record(Mutation::Dismiss {
                presenter: self.name().to_string(),
                dismissed: presented.name().to_string(),
                animated,
            });
        }
        self.inner.tree.complete(completion);
    }

    fn push(&self, node: Self, animated: bool, completion: NodeCompletion) {
        self.adopt(&node);
        self.inner.state.borrow_mut().children.push(node.clone());
        self.inner.tree.record(Mutation::Push {
            stack: self.name().to_string(),
            node: node.name().to_string(),
            animated,
        });
        self.inner.tree.complete(completion);
    }

    fn set_stack(&self, nodes: Vec<Self>, animated: bool, completion: NodeCompletion) {
        let names = nodes.iter().map(|n| n.name().to_string()).collect();
        self.replace_children(nodes);
        self.inner.tree.record(Mutation::SetStack {
            stack: self.name().to_string(),
            nodes: names,
            animated,
        });
        self.inner.tree.complete(completion);
    }

    fn select_child(&self, child: &Self) -> bool {
        if self.inner.kind != NodeKind::Tab {
            return false;
        }
        let mut state = self.inner.state.borrow_mut();
        let Some(index) = state.children.iter().position(|c| c.is_same_node(child)) else {
            return false;
        };
        state.selected = Some(index);
        drop(state);
        self.inner.tree.record(Mutation::SelectTab {
            tabs: self.name().to_string(),
            child: child.name().to_string(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn noop() -> NodeCompletion {
        Box::new(|| {})
    }

    #[test]
    fn test_stack_relations() {
        let tree = HeadlessTree::new();
        let a = tree.leaf("a");
        let b = tree.leaf("b");
        let nav = tree.stack("nav", vec![a.clone(), b.clone()]);

        assert_eq!(nav.kind(), NodeKind::Stack);
        assert!(a.stack_container().unwrap().is_same_node(&nav));
        assert!(b.direct_container().unwrap().is_same_node(&nav));
        assert!(nav.stack_container().is_none());
        assert_eq!(nav.child_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_container_lookups() {
        let tree = HeadlessTree::new();
        let a = tree.leaf("a");
        let nav = tree.stack("nav", vec![a.clone()]);
        let tabs = tree.tabs("tabs", vec![nav.clone()]);

        assert!(a.tab_container().unwrap().is_same_node(&tabs));
        assert!(a.direct_container().unwrap().is_same_node(&nav));
        assert!(nav.direct_container().unwrap().is_same_node(&tabs));
        assert!(tabs.selected_child().unwrap().is_same_node(&nav));
    }

    #[test]
    fn test_split_lookup() {
        let tree = HeadlessTree::new();
        let master = tree.leaf("master");
        let split = tree.split("split", vec![master.clone(), tree.leaf("detail")]);
        assert!(master.split_container().unwrap().is_same_node(&split));
        assert!(master.direct_container().unwrap().is_same_node(&split));
        assert!(split.selected_child().is_none());
    }

    #[test]
    fn test_present_and_dismiss() {
        let tree = HeadlessTree::new();
        let home = tree.leaf("home");
        let modal = tree.leaf("modal");
        let inner = tree.leaf("inner");

        home.present(modal.clone(), true, noop());
        modal.present(inner.clone(), false, noop());
        assert!(modal.presenting_node().unwrap().is_same_node(&home));
        assert!(!modal.is_being_presented());

        home.dismiss_presented(true, noop());
        assert!(home.presented_node().is_none());
        assert!(modal.presenting_node().is_none());
        assert!(modal.presented_node().is_none());
        assert!(inner.presenting_node().is_none());

        assert_eq!(
            tree.journal().last(),
            Some(&Mutation::Dismiss {
                presenter: "home".into(),
                dismissed: "modal".into(),
                animated: true,
            })
        );
    }

    #[test]
    fn test_present_over_presenting_node_goes_on_top() {
        let tree = HeadlessTree::new();
        let home = tree.leaf("home");
        let first = tree.leaf("first");
        let second = tree.leaf("second");

        home.present(first.clone(), false, noop());
        home.present(second.clone(), false, noop());
        assert!(second.presenting_node().unwrap().is_same_node(&first));
    }

    #[test]
    fn test_dismiss_without_presented_node_still_completes() {
        let tree = HeadlessTree::new();
        let home = tree.leaf("home");
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        home.dismiss_presented(false, Box::new(move || flag.set(true)));
        assert!(done.get());
        assert!(tree.journal().is_empty());
    }

    #[test]
    fn test_set_stack_reparents() {
        let tree = HeadlessTree::new();
        let a = tree.leaf("a");
        let b = tree.leaf("b");
        let c = tree.leaf("c");
        let nav = tree.stack("nav", vec![a.clone(), b.clone()]);
        let other = tree.stack("other", vec![c.clone()]);

        nav.set_stack(vec![a.clone(), c.clone()], false, noop());
        assert_eq!(nav.child_names(), vec!["a", "c"]);
        assert!(b.parent().is_none());
        assert!(c.parent().unwrap().is_same_node(&nav));
        assert!(other.child_names().is_empty());
    }

    #[test]
    fn test_select_child() {
        let tree = HeadlessTree::new();
        let one = tree.leaf("one");
        let two = tree.leaf("two");
        let tabs = tree.tabs("tabs", vec![one.clone(), two.clone()]);

        assert!(tabs.select_child(&two));
        assert!(tabs.selected_child().unwrap().is_same_node(&two));
        assert!(!tabs.select_child(&tree.leaf("stranger")));
        assert!(!one.select_child(&two));
    }

    #[test]
    fn test_deferred_completions() {
        let tree = HeadlessTree::deferred();
        let home = tree.leaf("home");
        let modal = tree.leaf("modal");
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        home.present(modal.clone(), true, Box::new(move || flag.set(true)));
        assert!(modal.is_being_presented());
        assert!(!done.get());
        assert_eq!(tree.pending_completions(), 1);

        assert_eq!(tree.run_until_idle(), 1);
        assert!(done.get());
        assert!(!modal.is_being_presented());
    }
}

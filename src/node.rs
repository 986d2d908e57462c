//! The presentation-node capability.
//!
//! The router does not own any UI. It drives an external toolkit through
//! [`PresentationNode`], a cheap handle onto one node of the toolkit's
//! navigation tree. Every relation the router needs is looked up through the
//! handle on demand and never cached, so the toolkit stays the single owner of
//! its nodes.
//!
//! Primitives that change the tree take a completion which the toolkit must
//! call exactly once, when the visual change has finished.
//!
//! See [`headless`](crate::headless) for an in-memory implementation.

use std::fmt::Debug;

/// Called by the toolkit when a visual change has finished.
pub type NodeCompletion = Box<dyn FnOnce()>;

/// What kind of node a handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A plain content node.
    Leaf,
    /// An ordered stack of children; the last child is on top.
    Stack,
    /// A set of children with one selected at a time.
    Tab,
    /// A side-by-side container.
    Split,
}

/// Handle onto a node of the UI navigation tree.
///
/// Cloning a handle must not clone the node; [`is_same_node`] compares
/// identity.
///
/// [`is_same_node`]: PresentationNode::is_same_node
pub trait PresentationNode: Clone + Debug + 'static {
    /// Identity comparison.
    fn is_same_node(&self, other: &Self) -> bool;

    /// The node's kind.
    fn kind(&self) -> NodeKind;

    /// The nearest enclosing stack container.
    fn stack_container(&self) -> Option<Self>;

    /// The nearest enclosing split container.
    fn split_container(&self) -> Option<Self>;

    /// The nearest enclosing tab container.
    fn tab_container(&self) -> Option<Self>;

    /// The node that modally presented this one.
    fn presenting_node(&self) -> Option<Self>;

    /// The node this one is currently presenting modally.
    fn presented_node(&self) -> Option<Self>;

    /// Children of a stack, tab or split container, in order. Empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// The selected child of a tab container.
    fn selected_child(&self) -> Option<Self>;

    /// `true` while this node's modal presentation is still in progress.
    fn is_being_presented(&self) -> bool;

    /// Present `node` modally over this node.
    fn present(&self, node: Self, animated: bool, completion: NodeCompletion);

    /// Dismiss whatever this node is presenting.
    fn dismiss_presented(&self, animated: bool, completion: NodeCompletion);

    /// Push `node` on top of this stack.
    fn push(&self, node: Self, animated: bool, completion: NodeCompletion);

    /// Replace the whole content of this stack.
    fn set_stack(&self, nodes: Vec<Self>, animated: bool, completion: NodeCompletion);

    /// Select `child` in this tab container. Returns `false` if the toolkit
    /// refused the selection.
    fn select_child(&self, child: &Self) -> bool;

    /// The single direct container of this node, in priority order: stack,
    /// split, tab, then the presenting node.
    fn direct_container(&self) -> Option<Self> {
        self.stack_container()
            .or_else(|| self.split_container())
            .or_else(|| self.tab_container())
            .or_else(|| self.presenting_node())
    }

    /// Shortcut for `kind() == NodeKind::Stack`.
    fn is_stack(&self) -> bool {
        self.kind() == NodeKind::Stack
    }

    /// Shortcut for `kind() == NodeKind::Tab`.
    fn is_tab(&self) -> bool {
        self.kind() == NodeKind::Tab
    }
}

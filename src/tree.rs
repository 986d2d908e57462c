//! Relations between nodes of the presentation tree.
//!
//! [`NodeRelations`] is implemented for every [`PresentationNode`] and adds
//! the queries the navigator reconciles with: the visible top node, ancestor
//! chains, the lowest common ancestor and liveness. All of them are computed
//! from the toolkit on every call.
//!
//! Walks are bounded by [`MAX_TREE_DEPTH`].

use crate::node::{NodeCompletion, PresentationNode};
use crate::trace_log;

/// Upper bound on the number of nodes any relation walk visits in depth.
pub const MAX_TREE_DEPTH: usize = 64;

/// Tree queries and helpers derived from the [`PresentationNode`] primitives.
pub trait NodeRelations: PresentationNode {
    /// The deepest visible node below (or at) this one.
    ///
    /// Descends into the presented node first, then a tab container's
    /// selected child, then a stack's last child. Split containers are not
    /// descended into.
    fn top_node(&self) -> Self {
        let mut node = self.clone();
        for _ in 0..MAX_TREE_DEPTH {
            let next = node
                .presented_node()
                .or_else(|| node.is_tab().then(|| node.selected_child()).flatten())
                .or_else(|| node.is_stack().then(|| node.children().pop()).flatten());
            match next {
                Some(next) => node = next,
                None => break,
            }
        }
        node
    }

    /// This node followed by each successive direct container.
    fn ancestor_chain(&self) -> Vec<Self> {
        let mut chain = vec![self.clone()];
        let mut current = self.direct_container();
        while let Some(node) = current {
            if chain.len() >= MAX_TREE_DEPTH {
                trace_log!("Ancestor chain of {:?} truncated at {}", self, MAX_TREE_DEPTH);
                break;
            }
            current = node.direct_container();
            chain.push(node);
        }
        chain
    }

    /// The first node of this node's chain that is also in `other`'s chain.
    fn lowest_common_ancestor(&self, other: &Self) -> Option<Self> {
        let theirs = other.ancestor_chain();
        self.ancestor_chain()
            .into_iter()
            .find(|mine| theirs.iter().any(|node| node.is_same_node(mine)))
    }

    /// `true` if `other` is in this node's chain, or is a member (at any
    /// depth) of a container in the chain.
    ///
    /// Presented nodes are not members: a modal branch beside this one is not
    /// reachable.
    fn has_ancestor(&self, other: &Self) -> bool {
        self.ancestor_chain()
            .iter()
            .any(|node| node.is_same_node(other) || contains_member(node, other, 0))
    }

    /// `true` if this node's chain reaches `root`.
    fn is_live_in(&self, root: &Self) -> bool {
        self.ancestor_chain()
            .iter()
            .any(|node| node.is_same_node(root))
    }

    /// The first node on the visible path from this one (this node, then
    /// selected tabs and stack tops) that is presenting something.
    fn visible_presenter(&self) -> Option<Self> {
        let mut node = self.clone();
        for _ in 0..MAX_TREE_DEPTH {
            if node.presented_node().is_some() {
                return Some(node);
            }
            let next = if node.is_tab() {
                node.selected_child()
            } else if node.is_stack() {
                node.children().pop()
            } else {
                None
            };
            node = next?;
        }
        None
    }

    /// Dismiss any modal presented on the visible path from this node. The
    /// completion always runs.
    fn dismiss_presented_if_needed(&self, animated: bool, completion: NodeCompletion) {
        match self.visible_presenter() {
            Some(presenter) => {
                trace_log!("Dismissing node presented by {:?}", presenter);
                presenter.dismiss_presented(animated, completion);
            }
            None => completion(),
        }
    }

    /// Select the tab whose branch contains `node`.
    ///
    /// Returns `true` if the selection changed.
    fn switch_to_tab_containing(&self, node: &Self) -> bool {
        if !self.is_tab() {
            return false;
        }

        let chain = node.ancestor_chain();
        let Some(tab) = self
            .children()
            .into_iter()
            .find(|child| chain.iter().any(|n| n.is_same_node(child)))
        else {
            return false;
        };

        if self
            .selected_child()
            .is_some_and(|selected| selected.is_same_node(&tab))
        {
            return false;
        }

        trace_log!("Switching {:?} to tab {:?}", self, tab);
        self.select_child(&tab)
    }
}

impl<N: PresentationNode> NodeRelations for N {}

fn contains_member<N: PresentationNode>(container: &N, target: &N, depth: usize) -> bool {
    if depth >= MAX_TREE_DEPTH {
        return false;
    }
    container
        .children()
        .iter()
        .any(|child| child.is_same_node(target) || contains_member(child, target, depth + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessNode, HeadlessTree, Mutation};

    fn noop() -> NodeCompletion {
        Box::new(|| {})
    }

    struct App {
        tree: HeadlessTree,
        tabs: HeadlessNode,
        feed: HeadlessNode,
        post: HeadlessNode,
        settings: HeadlessNode,
    }

    /// tabs [ feed_nav [feed, post], settings_nav [settings] ]
    fn app() -> App {
        let tree = HeadlessTree::new();
        let feed = tree.leaf("feed");
        let post = tree.leaf("post");
        let settings = tree.leaf("settings");
        let feed_nav = tree.stack("feed_nav", vec![feed.clone(), post.clone()]);
        let settings_nav = tree.stack("settings_nav", vec![settings.clone()]);
        let tabs = tree.tabs("tabs", vec![feed_nav, settings_nav]);
        App {
            tree,
            tabs,
            feed,
            post,
            settings,
        }
    }

    fn names(nodes: &[HeadlessNode]) -> Vec<&str> {
        nodes.iter().map(HeadlessNode::name).collect()
    }

    #[test]
    fn test_top_node() {
        let app = app();
        assert!(app.tabs.top_node().is_same_node(&app.post));

        let modal = app.tree.leaf("modal");
        app.post.present(modal.clone(), false, noop());
        assert!(app.tabs.top_node().is_same_node(&modal));
    }

    #[test]
    fn test_top_node_of_empty_stack_is_itself() {
        let tree = HeadlessTree::new();
        let nav = tree.stack("nav", vec![]);
        assert!(nav.top_node().is_same_node(&nav));
    }

    #[test]
    fn test_top_node_stops_at_split() {
        let tree = HeadlessTree::new();
        let split = tree.split("split", vec![tree.leaf("a"), tree.leaf("b")]);
        assert!(split.top_node().is_same_node(&split));
    }

    #[test]
    fn test_ancestor_chain() {
        let app = app();
        let chain = app.post.ancestor_chain();
        assert_eq!(names(&chain), vec!["post", "feed_nav", "tabs"]);
    }

    #[test]
    fn test_ancestor_chain_follows_presenting_node() {
        let app = app();
        let modal = app.tree.leaf("modal");
        let modal_nav = app.tree.stack("modal_nav", vec![modal.clone()]);
        app.post.present(modal_nav, false, noop());

        let chain = modal.ancestor_chain();
        assert_eq!(
            names(&chain),
            vec!["modal", "modal_nav", "post", "feed_nav", "tabs"]
        );
    }

    #[test]
    fn test_lowest_common_ancestor() {
        let app = app();
        let lca = app.post.lowest_common_ancestor(&app.settings).unwrap();
        assert!(lca.is_same_node(&app.tabs));

        let lca = app.post.lowest_common_ancestor(&app.feed).unwrap();
        assert_eq!(lca.name(), "feed_nav");

        let stranger = app.tree.leaf("stranger");
        assert!(app.post.lowest_common_ancestor(&stranger).is_none());
    }

    #[test]
    fn test_lowest_common_ancestor_with_self() {
        let app = app();
        assert!(app
            .post
            .lowest_common_ancestor(&app.post)
            .unwrap()
            .is_same_node(&app.post));
    }

    #[test]
    fn test_has_ancestor() {
        let app = app();
        assert!(app.post.has_ancestor(&app.tabs));
        assert!(app.post.has_ancestor(&app.feed));
        assert!(app.post.has_ancestor(&app.settings));
        assert!(!app.post.has_ancestor(&app.tree.leaf("stranger")));
    }

    #[test]
    fn test_has_ancestor_ignores_sideways_modal() {
        let app = app();
        let modal = app.tree.leaf("modal");
        app.settings.present(modal.clone(), false, noop());

        assert!(modal.has_ancestor(&app.post));
        assert!(!app.post.has_ancestor(&modal));
    }

    #[test]
    fn test_is_live_in() {
        let app = app();
        assert!(app.post.is_live_in(&app.tabs));
        assert!(!app.tree.leaf("fresh").is_live_in(&app.tabs));
    }

    #[test]
    fn test_dismiss_presented_if_needed() {
        let app = app();
        app.post.dismiss_presented_if_needed(false, noop());
        assert!(app.tree.journal().is_empty());

        app.post.present(app.tree.leaf("modal"), false, noop());
        app.tree.clear_journal();
        app.post.dismiss_presented_if_needed(true, noop());
        assert!(matches!(
            app.tree.journal().as_slice(),
            [Mutation::Dismiss { animated: true, .. }]
        ));
    }

    #[test]
    fn test_dismiss_presented_below_container() {
        let app = app();
        let modal = app.tree.leaf("modal");
        app.post.present(modal.clone(), false, noop());
        assert!(app.tabs.visible_presenter().unwrap().is_same_node(&app.post));

        app.tabs.dismiss_presented_if_needed(false, noop());
        assert!(app.post.presented_node().is_none());
        assert!(app.tabs.visible_presenter().is_none());
    }

    #[test]
    fn test_switch_to_tab_containing() {
        let app = app();
        assert!(app.tabs.switch_to_tab_containing(&app.settings));
        assert!(app.tabs.top_node().is_same_node(&app.settings));

        // Already selected.
        assert!(!app.tabs.switch_to_tab_containing(&app.settings));
        // Not a tab container.
        assert!(!app.post.switch_to_tab_containing(&app.feed));
        // Not in any tab.
        assert!(!app.tabs.switch_to_tab_containing(&app.tree.leaf("stranger")));
    }
}

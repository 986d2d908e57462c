//! Shared fixtures for the integration tests.
//!
//! Builds a small tab-based app on the headless toolkit:
//!
//! ```text
//! tabs
//! ├── home_nav      [home, detail]
//! └── settings_nav  [settings]
//! ```

#![allow(dead_code)]

use route_navigator::headless::{HeadlessNode, HeadlessTree};
use route_navigator::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum AppRoute {
    Home,
    Detail,
    Settings,
    Profile(i64),
    Compose,
    Login,
    Flip,
}

impl RouteType for AppRoute {
    fn register_urls() -> Option<UrlMatcherGroup<Self>> {
        Some(
            UrlMatcherGroup::group(
                StringMatcher::many(["example.com", "www.example.com"]),
                StringMatcher::many(["http", "https"]),
                |paths| {
                    paths.map_static("/", || Ok(AppRoute::Home));
                    paths.map_static("settings", || Ok(AppRoute::Settings));
                    paths.map("users/{id}", |url| Ok(AppRoute::Profile(url.path_int("id")?)));
                },
            )
            .with(UrlMatcher::scheme("app", |paths| {
                paths.map_static("compose", || Ok(AppRoute::Compose));
            })),
        )
    }
}

/// Outcome slot filled by a navigation completion.
pub type Outcome = Rc<RefCell<Option<Result<()>>>>;

/// A completion that stores its result in the returned slot.
pub fn capture() -> (Outcome, NavigationCompletion) {
    let outcome: Outcome = Rc::default();
    let slot = outcome.clone();
    (outcome, Box::new(move |result| *slot.borrow_mut() = Some(result)))
}

/// Take the stored result, panicking if the completion never ran.
pub fn finished(outcome: &Outcome) -> Result<()> {
    let result = outcome.borrow_mut().take();
    result.expect("navigation completion was not called")
}

pub struct App {
    pub tree: HeadlessTree,
    pub root: HeadlessNode,
    pub nodes: Rc<RefCell<HashMap<String, HeadlessNode>>>,
}

impl App {
    /// The tab-based app, with completions run immediately.
    pub fn new() -> Self {
        Self::with_tree(HeadlessTree::new())
    }

    /// The tab-based app, with completions queued until `run_until_idle`.
    pub fn deferred() -> Self {
        Self::with_tree(HeadlessTree::deferred())
    }

    fn with_tree(tree: HeadlessTree) -> Self {
        let home = tree.leaf("home");
        let detail = tree.leaf("detail");
        let settings = tree.leaf("settings");
        let home_nav = tree.stack("home_nav", vec![home.clone(), detail.clone()]);
        let settings_nav = tree.stack("settings_nav", vec![settings.clone()]);
        let root = tree.tabs("tabs", vec![home_nav.clone(), settings_nav.clone()]);

        let nodes = [home, detail, settings, home_nav, settings_nav]
            .into_iter()
            .map(|node| (node.name().to_string(), node))
            .collect();

        Self {
            tree,
            root,
            nodes: Rc::new(RefCell::new(nodes)),
        }
    }

    pub fn node(&self, name: &str) -> HeadlessNode {
        self.nodes.borrow()[name].clone()
    }

    /// Resolves every route to a node of the same (snake case) name, creating
    /// missing nodes on first use.
    pub fn handler(&self) -> impl RouteHandler<AppRoute, HeadlessNode> + 'static {
        let nodes = self.nodes.clone();
        let tree = self.tree.clone();
        handler_fn(move |route: &AppRoute, _: &HeadlessNode| {
            let name = match route {
                AppRoute::Profile(id) => format!("profile-{id}"),
                other => other.name().to_lowercase(),
            };
            let node = nodes
                .borrow_mut()
                .entry(name.clone())
                .or_insert_with(|| tree.leaf(name))
                .clone();
            Ok(node)
        })
        .with_transition(|route| match route {
            AppRoute::Compose => RouteTransition::Modal,
            AppRoute::Login => RouteTransition::Replace,
            AppRoute::Flip => RouteTransition::custom("flip"),
            _ => RouteTransition::Inferred,
        })
    }

    pub fn router(&self) -> Router<AppRoute, HeadlessNode> {
        Router::builder(self.handler())
            .root(self.root.clone())
            .config(RouterConfig::default().animated(false))
            .build()
    }

    /// Navigate and return the outcome, which must already be available.
    pub fn navigate(&self, router: &Router<AppRoute, HeadlessNode>, route: AppRoute) -> Result<()> {
        let (outcome, completion) = capture();
        router.navigate(route, false, Some(completion));
        finished(&outcome)
    }

    pub fn top(&self) -> HeadlessNode {
        self.root.top_node()
    }
}

//! Headless Demo - Deep Links Example
//!
//! Drives a tab-based app built on the headless toolkit with deep links and
//! route navigations, printing the tree mutations each one causes.
//!
//! Run with `RUST_LOG=debug cargo run --example headless_demo` to see the
//! router's own logging.

use route_navigator::headless::{HeadlessNode, HeadlessTree};
use route_navigator::{
    handler_fn, NodeRelations, RouteTransition, RouteType, Router, RouterConfig, StringMatcher,
    UrlMatcher, UrlMatcherGroup, UserActivity,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
enum Route {
    Inbox,
    Thread(i64),
    Search { query: String },
    Compose,
    Account,
}

impl RouteType for Route {
    fn register_urls() -> Option<UrlMatcherGroup<Self>> {
        Some(
            UrlMatcherGroup::group(
                StringMatcher::many(["mail.example.com", "example.com"]),
                StringMatcher::many(["https", "http"]),
                |paths| {
                    paths.map_static("inbox", || Ok(Route::Inbox));
                    paths.map("threads/{id}", |url| Ok(Route::Thread(url.path_int("id")?)));
                    paths.map("search", |url| {
                        Ok(Route::Search {
                            query: url.query("q").unwrap_or_default().to_string(),
                        })
                    });
                    paths.map_static("account", || Ok(Route::Account));
                },
            )
            .with(UrlMatcher::scheme("mail", |paths| {
                paths.map_static("compose", || Ok(Route::Compose));
            })),
        )
    }
}

fn main() {
    env_logger::init();

    // tabs [ mail_nav [inbox], account_nav [account] ]
    let tree = HeadlessTree::new();
    let inbox = tree.leaf("inbox");
    let account = tree.leaf("account");
    let mail_nav = tree.stack("mail_nav", vec![inbox.clone()]);
    let account_nav = tree.stack("account_nav", vec![account.clone()]);
    let root = tree.tabs("tabs", vec![mail_nav.clone(), account_nav]);

    let threads: Rc<RefCell<HashMap<i64, HeadlessNode>>> = Rc::default();
    let factory = tree.clone();
    let handler = handler_fn(move |route: &Route, _current: &HeadlessNode| {
        Ok(match route {
            Route::Inbox => inbox.clone(),
            Route::Account => account.clone(),
            Route::Thread(id) => threads
                .borrow_mut()
                .entry(*id)
                .or_insert_with(|| factory.leaf(format!("thread-{id}")))
                .clone(),
            Route::Search { query } => factory.leaf(format!("search({query})")),
            Route::Compose => factory.leaf("compose"),
        })
    })
    .with_transition(|route| match route {
        Route::Compose => RouteTransition::Modal,
        Route::Search { .. } => RouteTransition::Replace,
        _ => RouteTransition::Inferred,
    });

    let router = Router::builder(handler)
        .root(root.clone())
        .config(RouterConfig::default().animated(false))
        .build();

    let links = [
        "https://mail.example.com/threads/12",
        "https://mail.example.com/threads/40",
        "mail://new/compose",
        "https://example.com/threads/12",
        "https://example.com/account",
        "https://example.com/search?q=invoices",
        "https://example.com/threads/oops",
        "https://unknown.org/inbox",
    ];

    for link in links {
        let Ok(url) = Url::parse(link) else {
            println!("{link}: not a URL");
            continue;
        };

        tree.clear_journal();
        let outcome: Rc<RefCell<Option<String>>> = Rc::default();
        let slot = outcome.clone();
        let handled = router.open_url(
            &url,
            false,
            Some(Box::new(move |result: route_navigator::Result<()>| {
                *slot.borrow_mut() = Some(match result {
                    Ok(()) => "ok".to_string(),
                    Err(err) => format!("error: {err}"),
                });
            })),
        );

        println!("{link}");
        println!("  handled: {handled}, outcome: {:?}", outcome.borrow());
        for mutation in tree.journal() {
            println!("  {mutation:?}");
        }
        println!("  top: {:?}", root.top_node());
    }

    tree.clear_journal();
    let inbox_url = Url::parse("https://example.com/inbox").expect("static URL parses");
    let activity = UserActivity::browsing_web(inbox_url);
    println!("continue activity: {}", router.continue_activity(&activity));
    for mutation in tree.journal() {
        println!("  {mutation:?}");
    }
    println!("  mail stack: {:?}", mail_nav.child_names());

    for err in router.take_unhandled_errors() {
        println!("unhandled: {err}");
    }
}

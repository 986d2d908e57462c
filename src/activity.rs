//! User activities handed to the app by the platform.
//!
//! Only web-browsing activities that carry a URL are routed; see
//! [`Router::continue_activity`](crate::Router::continue_activity).

use url::Url;

/// Kind of a [`UserActivity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// The user followed a web link (universal link) into the app.
    BrowsingWeb,
    /// Any other activity, identified by the platform's type string.
    Other(String),
}

/// An activity the app was asked to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    /// What kind of activity this is.
    pub activity_type: ActivityType,
    /// The web page the activity refers to, if any.
    pub webpage_url: Option<Url>,
}

impl UserActivity {
    /// A web-browsing activity for `url`.
    pub fn browsing_web(url: Url) -> Self {
        Self {
            activity_type: ActivityType::BrowsingWeb,
            webpage_url: Some(url),
        }
    }

    /// An activity of any other type.
    pub fn other(activity_type: impl Into<String>) -> Self {
        Self {
            activity_type: ActivityType::Other(activity_type.into()),
            webpage_url: None,
        }
    }

    /// The URL to route, if this is a web-browsing activity with a URL.
    pub fn routable_url(&self) -> Option<&Url> {
        match self.activity_type {
            ActivityType::BrowsingWeb => self.webpage_url.as_ref(),
            ActivityType::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routable_url() {
        let url = Url::parse("https://example.com/users/1").unwrap();
        assert_eq!(UserActivity::browsing_web(url.clone()).routable_url(), Some(&url));

        let mut handoff = UserActivity::other("com.example.handoff");
        assert!(handoff.routable_url().is_none());
        handoff.webpage_url = Some(url);
        assert!(handoff.routable_url().is_none());

        let empty = UserActivity {
            activity_type: ActivityType::BrowsingWeb,
            webpage_url: None,
        };
        assert!(empty.routable_url().is_none());
    }
}

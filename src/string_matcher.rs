//! Case-insensitive scheme and host filters.

/// Predicate over an optional string, used to filter URL schemes and hosts.
///
/// Comparisons ignore case. A missing input only matches [`StringMatcher::Any`].
///
/// # Example
///
/// ```
/// use route_navigator::StringMatcher;
///
/// let hosts = StringMatcher::many(["example.com", "www.example.com"]);
/// assert!(hosts.matches(Some("WWW.Example.com")));
/// assert!(!hosts.matches(Some("example.org")));
/// assert!(!hosts.matches(None));
/// assert!(StringMatcher::Any.matches(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StringMatcher {
    /// Matches anything, including a missing value.
    #[default]
    Any,
    /// Matches a single value.
    One(String),
    /// Matches any value of the set.
    Many(Vec<String>),
}

impl StringMatcher {
    /// Match a single value.
    pub fn one(value: impl Into<String>) -> Self {
        Self::One(value.into())
    }

    /// Match any of the given values.
    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(values.into_iter().map(Into::into).collect())
    }

    /// Check whether `input` is accepted.
    pub fn matches(&self, input: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::One(value) => input.is_some_and(|input| eq_ignore_case(value, input)),
            Self::Many(values) => {
                input.is_some_and(|input| values.iter().any(|value| eq_ignore_case(value, input)))
            }
        }
    }
}

impl From<&str> for StringMatcher {
    fn from(value: &str) -> Self {
        Self::one(value)
    }
}

impl From<String> for StringMatcher {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for StringMatcher {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for StringMatcher {
    fn from(values: Vec<&str>) -> Self {
        Self::many(values)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

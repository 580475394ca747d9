//! Raw captured tokens.
//!
//! A successful match yields one token per capture, in template order.
//! Routes rarely have more than three captures, so tokens live inline.

use smallvec::SmallVec;

/// Captures stored without a heap allocation.
const INLINE_TOKENS: usize = 4;

/// Tokens captured by a successful match, keyed by capture name.
///
/// Values are already decoded according to their capture kind: single and
/// wildcard captures are percent-decoded, regex captures hold the raw text.
/// Iteration order is the left-to-right order of captures in the template.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::RawTokens;
///
/// let mut tokens = RawTokens::new();
/// tokens.push("say", "Hello");
/// tokens.push("to", "world");
///
/// assert_eq!(tokens.get("to"), Some("world"));
/// assert_eq!(tokens.get_index(0), Some(("say", "Hello")));
/// assert_eq!(tokens.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTokens {
    inner: SmallVec<[(String, String); INLINE_TOKENS]>,
}

impl RawTokens {
    /// Creates an empty token set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token set sized for `capacity` captures.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Appends a captured token.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the token captured under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `(name, token)` pair at capture position `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.inner
            .get(index)
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captured tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, token)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a RawTokens {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(as_pair as fn(&'a (String, String)) -> (&'a str, &'a str))
    }
}

fn as_pair((name, value): &(String, String)) -> (&str, &str) {
    (name.as_str(), value.as_str())
}

impl FromIterator<(String, String)> for RawTokens {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

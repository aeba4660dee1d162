//! The fixed list of known tags and substring matching against it.

use tracing::{debug, warn};

use super::normalize;

/// Default cap on the number of suggestions returned for one query.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 12;

/// Ordered, case-preserving list of known tags.
///
/// Loaded once and never modified afterwards. Duplicates are not checked;
/// the payload producer is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tags: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from an already decoded list.
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// Decode a vocabulary from a JSON array of strings.
    ///
    /// A blank payload, or one that is not a JSON array of strings, yields an
    /// empty vocabulary. The widget then simply never suggests anything.
    pub fn from_payload(payload: &str) -> Self {
        if payload.trim().is_empty() {
            debug!("Empty vocabulary payload");
            return Self::default();
        }

        match serde_json::from_str::<Vec<String>>(payload) {
            Ok(tags) => {
                debug!(count = tags.len(), "Vocabulary loaded");
                Self::new(tags)
            }
            Err(e) => {
                warn!(error = %e, "Invalid vocabulary payload, using empty vocabulary");
                Self::default()
            }
        }
    }

    /// All tags in their original order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of known tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if there are no known tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags containing `query`, in vocabulary order, at most `limit` of them.
    ///
    /// See [`match_tags`].
    pub fn matches(&self, query: &str, limit: usize) -> Vec<String> {
        match_tags(&self.tags, query, limit)
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

/// Filter `vocabulary` by case-insensitive substring containment of `query`.
///
/// Both sides are normalized before comparing. A query that normalizes to the
/// empty string matches nothing, so focusing an empty field does not dump the
/// whole vocabulary. The first `limit` hits win; there is no ranking.
pub fn match_tags<S: AsRef<str>>(vocabulary: &[S], query: &str, limit: usize) -> Vec<String> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    vocabulary
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| normalize(tag).contains(&needle))
        .take(limit)
        .map(str::to_string)
        .collect()
}

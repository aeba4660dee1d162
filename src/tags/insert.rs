//! Merging a chosen tag back into the buffer, and reading the final tag list.

use tracing::debug;

use super::{normalize, parse, SEPARATOR};

/// Separator written between tags, and after the last one.
pub const JOINER: &str = ", ";

/// Insert `tag` into `buffer`, replacing the token currently being typed.
///
/// The committed tokens of `buffer` are kept; the in-progress token is
/// dropped in favor of `tag`. See [`insert_into`] for the merge rules.
pub fn insert(buffer: &str, tag: &str) -> String {
    insert_into(&parse(buffer).committed, tag)
}

/// Append `tag` to the committed tokens and render the new buffer.
///
/// Committed tokens are re-trimmed and empty ones dropped. `tag` is skipped
/// when a committed token already has the same normalized form; the existing
/// token keeps its casing. The result always ends with [`JOINER`], so the
/// next parse sees an empty current token.
pub fn insert_into<S: AsRef<str>>(committed: &[S], tag: &str) -> String {
    let mut tokens: Vec<&str> = committed
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| !token.is_empty())
        .collect();

    let key = normalize(tag);
    if tokens.iter().any(|token| normalize(token) == key) {
        debug!(tag, "Tag already present, not adding");
    } else {
        tokens.push(tag);
    }

    let mut buffer = tokens.join(JOINER);
    buffer.push_str(JOINER);
    buffer
}

/// Turn a submitted buffer into the list of tag names to store.
///
/// Every segment is trimmed, leading `#` characters are removed when
/// `strip_hash` is set, and empty segments are dropped. A tag repeated with
/// different casing is kept once, first spelling wins.
pub fn collect_tags(buffer: &str, strip_hash: bool) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for part in buffer.split(SEPARATOR) {
        let mut name = part.trim();
        if strip_hash {
            name = name.trim_start_matches('#').trim();
        }
        if name.is_empty() {
            continue;
        }

        let key = normalize(name);
        if !tags.iter().any(|t| normalize(t) == key) {
            tags.push(name.to_string());
        }
    }

    tags
}

//! Tag buffer engine.
//!
//! Everything in this module is a pure function of its inputs: the comma
//! separated buffer, the vocabulary and the chosen tag. The UI layer owns the
//! buffer and calls into here on every edit.

mod insert;
mod popular;
mod token;
mod vocabulary;

pub use insert::{collect_tags, insert, insert_into, JOINER};
pub use popular::{rank_popular, PopularChip, DEFAULT_POPULAR_LIMIT};
pub use token::{parse, ParsedBuffer, SEPARATOR};
pub use vocabulary::{match_tags, Vocabulary, DEFAULT_MAX_SUGGESTIONS};

/// Comparison key for a tag: surrounding whitespace trimmed, lowercased.
///
/// Only ever used to compare tags. Display and storage keep the original text.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

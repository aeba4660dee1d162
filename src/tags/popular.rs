//! Popular tag chips.

use serde::{Deserialize, Serialize};

/// Default number of popular chips shown.
pub const DEFAULT_POPULAR_LIMIT: usize = 10;

/// A pre-rendered shortcut that inserts one tag when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularChip {
    /// Tag to insert. Falls back to the label when absent or blank.
    #[serde(default)]
    pub tag: Option<String>,
    /// Text shown on the chip.
    pub label: String,
}

impl PopularChip {
    /// A chip whose label is also the inserted tag.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            tag: None,
            label: label.into(),
        }
    }

    /// A chip that shows `label` but inserts `tag`.
    pub fn with_tag(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            label: label.into(),
        }
    }

    /// The tag inserted when this chip is activated.
    pub fn value(&self) -> &str {
        match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => &self.label,
        }
    }
}

/// Build chips for the most used tags.
///
/// Sorted by usage count descending, ties broken by name ascending, and cut
/// to `limit`.
pub fn rank_popular<I>(counts: I, limit: usize) -> Vec<PopularChip>
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut counts: Vec<(String, u64)> = counts.into_iter().collect();
    counts.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });

    counts
        .into_iter()
        .take(limit)
        .map(|(name, _)| PopularChip::new(name))
        .collect()
}

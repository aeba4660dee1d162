//! User interface components.
//!
//! Everything here draws with ratatui and reads crossterm input; the tag
//! logic itself lives in [`crate::tags`].

mod components;
pub mod theme;

pub use components::{
    help_bar, render_hints, ChipRow, Focus, SuggestionAction, SuggestionList, TagField,
    TagFieldParts, TextInput,
};

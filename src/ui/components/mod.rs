//! Reusable UI components.

mod chips;
pub mod help_bar;
mod input;
mod suggestions;
mod tag_field;

pub use chips::ChipRow;
pub use help_bar::render_hints;
pub use input::TextInput;
pub use suggestions::{SuggestionAction, SuggestionList};
pub use tag_field::{Focus, TagField, TagFieldParts};

//! Event handling for the application.
//!
//! Terminal input is turned into [`Event`] values. Focus changes and mouse
//! presses are kept because the tag field dismisses its suggestions on blur
//! and accepts clicks on suggestions and chips.

mod handler;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A mouse button press, release, drag or scroll.
    Mouse(MouseEvent),
    /// Bracketed paste.
    Paste(String),
    /// The terminal window gained focus.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}

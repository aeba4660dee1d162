//! Single-line text input.
//!
//! Owns the tag buffer. The cursor counts characters, not bytes, so tags
//! with accents or other multibyte text can be edited safely.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tags::SEPARATOR;
use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert text at the cursor. Line breaks are replaced with spaces.
    ///
    /// Returns true if anything was inserted.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let text: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        if text.is_empty() {
            return false;
        }

        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
        true
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_count() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return false;
                }
                self.clear();
                true
            }
            // Delete the tag before the cursor, including the separator run
            // that follows it. Punctuation inside a tag (`c++`, `node.js`)
            // is part of the tag.
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return false;
                }
                let is_break = |c: char| c == SEPARATOR || c.is_whitespace();
                let end = self.byte_index(self.cursor);
                let before = &self.value[..end];
                let trimmed = before.trim_end_matches(is_break);
                let start = trimmed
                    .char_indices()
                    .rev()
                    .find(|(_, c)| is_break(*c))
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                self.cursor -= self.value[start..end].chars().count();
                self.value.replace_range(start..end, "");
                true
            }
            _ => false,
        }
    }

    /// Render the input with a titled border.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();
        let show_placeholder = self.value.is_empty() && !self.placeholder.is_empty();

        let text_style = if show_placeholder {
            Style::default().fg(t.muted)
        } else {
            Style::default()
        };

        let title_style = if focused {
            Style::default().fg(t.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(t.border(focused));

        let display = if show_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        // Keep the cursor visible when the value is wider than the field.
        let inner_width = area.width.saturating_sub(2) as usize;
        let column = self.cursor_column();
        let scroll = (column + 1).saturating_sub(inner_width);

        let input = Paragraph::new(display)
            .style(text_style)
            .scroll((0, scroll as u16))
            .block(block);
        frame.render_widget(input, area);

        if focused && inner_width > 0 {
            let cursor_x = area.x + 1 + (column - scroll) as u16;
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }

    /// Screen column of the cursor, counted in cells from the start of the
    /// value. Differs from [`TextInput::cursor`] when wide characters precede
    /// it.
    pub fn cursor_column(&self) -> usize {
        Span::raw(&self.value[..self.byte_index(self.cursor)]).width()
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

//! Suggestion dropdown.
//!
//! Holds the entries for the current query and nothing else: every update
//! replaces the whole list. An empty update closes the dropdown.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};
use tracing::trace;

use crate::ui::theme::theme;

/// Action resulting from suggestion list input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// The highlight moved.
    Moved,
    /// An entry was activated (tag text).
    Choose(String),
}

/// Suggestion dropdown.
#[derive(Debug, Default)]
pub struct SuggestionList {
    /// Entries in display order.
    entries: Vec<String>,
    /// Index of the highlighted entry.
    highlighted: usize,
    /// Inner area of the last draw, used to map clicks to entries.
    drawn_area: Cell<Option<Rect>>,
}

impl SuggestionList {
    /// Create a closed, empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries with `matches`.
    ///
    /// Previous entries are always discarded first, so calling this twice
    /// with the same list leaves the same state. An empty `matches` closes
    /// the list.
    pub fn set_matches(&mut self, matches: Vec<String>) {
        trace!(count = matches.len(), "Rendering suggestions");
        self.entries = matches;
        self.highlighted = 0;
        if self.entries.is_empty() {
            self.drawn_area.set(None);
        }
    }

    /// Remove all entries and close the list.
    pub fn clear(&mut self) {
        self.set_matches(Vec::new());
    }

    /// Check if the list is visible.
    pub fn is_open(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Current entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the highlighted entry.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// The highlighted entry, if the list is open.
    pub fn highlighted_entry(&self) -> Option<&str> {
        self.entries.get(self.highlighted).map(String::as_str)
    }

    /// Handle navigation and activation keys.
    ///
    /// Returns `None` for keys the list does not use, and for every key while
    /// closed, so the caller can pass them on to the input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SuggestionAction> {
        if !self.is_open() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                if self.highlighted + 1 < self.entries.len() {
                    self.highlighted += 1;
                }
                Some(SuggestionAction::Moved)
            }
            (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Some(SuggestionAction::Moved)
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self
                .highlighted_entry()
                .map(|tag| SuggestionAction::Choose(tag.to_string())),
            _ => None,
        }
    }

    /// The entry drawn at a terminal cell, if any.
    pub fn entry_at(&self, column: u16, row: u16) -> Option<&str> {
        let area = self.drawn_area.get()?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !self.is_open() || !inside {
            return None;
        }
        self.entries
            .get(usize::from(row - area.y))
            .map(String::as_str)
    }

    /// Rows needed to draw every entry, borders included.
    pub fn height(&self) -> u16 {
        if self.is_open() {
            self.entries.len() as u16 + 2
        } else {
            0
        }
    }

    /// Draw the dropdown over whatever is in `area`. Does nothing when closed.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_open() || area.height < 3 {
            self.drawn_area.set(None);
            return;
        }

        let t = theme();
        let block = Block::default()
            .title(" Suggestions ")
            .borders(Borders::ALL)
            .border_style(t.border(true));
        let inner = block.inner(area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|tag| ListItem::new(tag.as_str()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(t.highlight())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.highlighted));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);

        // Entries past the visible rows cannot be clicked.
        self.drawn_area.set(Some(inner));
    }
}

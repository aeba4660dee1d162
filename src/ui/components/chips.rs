//! Row of popular tag chips.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tags::PopularChip;
use crate::ui::theme::theme;

/// Columns between two chips.
const CHIP_GAP: u16 = 1;

/// Text drawn before the first chip.
const PREFIX: &str = "Popular: ";

/// A single-line row of chips, navigable with Left/Right.
#[derive(Debug, Default)]
pub struct ChipRow {
    chips: Vec<PopularChip>,
    /// Index of the selected chip while the row has focus.
    selected: usize,
    /// Area of the last draw, used to map clicks to chips.
    drawn_area: Cell<Option<Rect>>,
}

impl ChipRow {
    /// Create a row from chips in display order.
    pub fn new(chips: Vec<PopularChip>) -> Self {
        Self {
            chips,
            selected: 0,
            drawn_area: Cell::new(None),
        }
    }

    /// Chips in display order.
    pub fn chips(&self) -> &[PopularChip] {
        &self.chips
    }

    /// Check if there are no chips.
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Index of the selected chip.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Handle navigation and activation keys.
    ///
    /// Returns the tag of the activated chip.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<String> {
        if self.chips.is_empty() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                if self.selected + 1 < self.chips.len() {
                    self.selected += 1;
                }
                None
            }
            (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) | (KeyCode::Char(' '), KeyModifiers::NONE) => {
                self.chips.get(self.selected).map(|c| c.value().to_string())
            }
            _ => None,
        }
    }

    /// The tag of the chip drawn at a terminal cell, if any.
    pub fn chip_at(&self, column: u16, row: u16) -> Option<&str> {
        let area = self.drawn_area.get()?;
        if row != area.y || column < area.x || column >= area.x + area.width {
            return None;
        }

        let mut x = area.x;
        for chip in &self.chips {
            let width = chip_width(chip);
            if column >= x && column < x + width {
                return Some(chip.value());
            }
            x += width + CHIP_GAP;
        }
        None
    }

    /// Draw the row. The selected chip is highlighted only when `focused`.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if area.height == 0 {
            self.drawn_area.set(None);
            return;
        }

        let t = theme();
        let mut spans = vec![Span::styled(PREFIX, Style::default().fg(t.muted))];
        for (i, chip) in self.chips.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".repeat(CHIP_GAP as usize)));
            }
            let style = if focused && i == self.selected {
                t.highlight()
            } else {
                t.chip()
            };
            spans.push(Span::styled(chip_text(chip), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let offset = Span::raw(PREFIX).width() as u16;
        let chips_area = Rect::new(
            area.x + offset.min(area.width),
            area.y,
            area.width.saturating_sub(offset),
            1,
        );
        self.drawn_area.set(Some(chips_area));
    }
}

fn chip_text(chip: &PopularChip) -> String {
    format!(" {} ", chip.label)
}

/// Columns the chip occupies on screen. Wide characters take two cells.
fn chip_width(chip: &PopularChip) -> u16 {
    Span::raw(chip_text(chip)).width() as u16
}

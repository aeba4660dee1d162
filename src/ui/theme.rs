//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border and text color of the focused component.
    pub focus: Color,
    /// Border color of unfocused components and placeholder text.
    pub muted: Color,
    /// Highlight background for the active suggestion.
    pub highlight_bg: Color,
    /// Highlight foreground for the active suggestion.
    pub highlight_fg: Color,
    /// Chip background.
    pub chip_bg: Color,
    /// Chip foreground.
    pub chip_fg: Color,
    /// Key names in the help bar.
    pub key_hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus: Color::Yellow,
            muted: Color::DarkGray,
            highlight_bg: Color::Cyan,
            highlight_fg: Color::Black,
            chip_bg: Color::Blue,
            chip_fg: Color::White,
            key_hint: Color::Cyan,
        }
    }
}

impl Theme {
    /// Style of the highlighted suggestion or selected chip.
    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of an unselected chip.
    pub fn chip(&self) -> Style {
        Style::default().bg(self.chip_bg).fg(self.chip_fg)
    }

    /// Border style for a component with the given focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.muted)
        }
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

//! Key hint bar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Hints while typing with the suggestion list closed.
pub const INPUT_HINTS: &[(&str, &str)] = &[
    ("Tab", "popular tags"),
    ("Enter", "submit"),
    ("Ctrl+S", "submit"),
    ("Esc", "quit"),
];

/// Hints while the suggestion list is open.
pub const SUGGESTION_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "choose"),
    ("Enter", "insert"),
    ("Esc", "close"),
    ("Tab", "popular tags"),
];

/// Hints while the chip row has focus.
pub const CHIP_HINTS: &[(&str, &str)] = &[
    ("←/→", "move"),
    ("Enter/Space", "insert"),
    ("Tab/Esc", "back to input"),
];

/// Render `(key, description)` pairs on one line.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let line = Line::from(hint_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

/// Build styled spans: each key in brackets, then its description.
fn hint_spans(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let t = theme();
    let mut spans = Vec::with_capacity(hints.len() * 2);

    for (i, (key, description)) in hints.iter().enumerate() {
        let sep = if i == 0 { "" } else { "  " };
        spans.push(Span::styled(
            format!("{}[{}]", sep, key),
            Style::default().fg(t.key_hint),
        ));
        spans.push(Span::styled(
            format!(" {}", description),
            Style::default().fg(t.muted),
        ));
    }

    spans
}

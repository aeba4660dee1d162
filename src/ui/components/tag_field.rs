//! Tag input with live suggestions and popular tag chips.
//!
//! `TagField` is the adapter between terminal events and the pure functions
//! in [`crate::tags`]. The buffer lives in the [`TextInput`] and nowhere
//! else: each event reads it, runs the tag engine and writes the result
//! back.
//!
//! ## Dismissal
//!
//! Losing focus schedules a dismissal `dismiss_delay` later instead of
//! closing the list immediately. Deadlines are only checked in [`TagField::tick`],
//! which the event loop calls after handling input, so a click on a
//! suggestion is always applied before a dismissal it races with. Scheduled
//! dismissals are never cancelled; firing one on a closed list is a no-op.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{debug, trace};

use super::{help_bar, ChipRow, SuggestionAction, SuggestionList, TextInput};
use crate::config::Settings;
use crate::tags::{self, PopularChip, Vocabulary};

/// Title of the input box.
const INPUT_LABEL: &str = "Tags";

/// The pieces a tag field is built from.
///
/// `input`, `suggestions` and `vocabulary` are required; if any of them is
/// missing the field does not mount.
#[derive(Debug, Default)]
pub struct TagFieldParts {
    /// The text input that owns the buffer.
    pub input: Option<TextInput>,
    /// The dropdown for suggestions.
    pub suggestions: Option<SuggestionList>,
    /// Raw vocabulary payload, a JSON array of strings.
    pub vocabulary: Option<String>,
    /// Popular tag chips, possibly none.
    pub chips: Vec<PopularChip>,
}

/// Which part of the field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text input.
    #[default]
    Input,
    /// The popular chip row.
    Chips,
    /// Nothing in the field (terminal unfocused or click elsewhere).
    Outside,
}

/// Tag input widget.
#[derive(Debug)]
pub struct TagField {
    input: TextInput,
    suggestions: SuggestionList,
    chips: ChipRow,
    vocabulary: Vocabulary,
    max_suggestions: usize,
    dismiss_delay: Duration,
    focus: Focus,
    /// Deadlines of scheduled dismissals, oldest first.
    pending_dismissals: Vec<Instant>,
    /// Area of the input box at the last draw.
    input_area: Cell<Option<Rect>>,
}

impl TagField {
    /// Build a tag field from its parts.
    ///
    /// Returns `None`, without error, if a required part is missing. An
    /// unparseable vocabulary payload still mounts, with no vocabulary.
    pub fn mount(parts: TagFieldParts, settings: &Settings) -> Option<Self> {
        let (Some(input), Some(suggestions), Some(payload)) =
            (parts.input, parts.suggestions, parts.vocabulary)
        else {
            debug!("Tag field parts missing, not mounting");
            return None;
        };

        let vocabulary = Vocabulary::from_payload(&payload);
        debug!(
            vocabulary = vocabulary.len(),
            chips = parts.chips.len(),
            "Tag field mounted"
        );

        Some(Self {
            input,
            suggestions,
            chips: ChipRow::new(parts.chips),
            vocabulary,
            max_suggestions: settings.max_suggestions,
            dismiss_delay: settings.dismiss_delay(),
            focus: Focus::Input,
            pending_dismissals: Vec::new(),
            input_area: Cell::new(None),
        })
    }

    /// The current buffer.
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// The known tags.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The suggestion dropdown.
    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    /// The popular chip row.
    pub fn chips(&self) -> &ChipRow {
        &self.chips
    }

    /// Check if the suggestion list is open.
    pub fn is_open(&self) -> bool {
        self.suggestions.is_open()
    }

    /// Which part of the field has focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Number of dismissals scheduled and not yet fired.
    pub fn pending_dismissals(&self) -> usize {
        self.pending_dismissals.len()
    }

    /// Recompute suggestions for the token being typed.
    ///
    /// Called after every edit of the buffer.
    pub fn refresh(&mut self) {
        let query = tags::parse(self.input.value()).current;
        let matches = self.vocabulary.matches(&query, self.max_suggestions);
        trace!(query = %query, matches = matches.len(), "Suggestions refreshed");
        self.suggestions.set_matches(matches);
    }

    /// Insert `tag` into the buffer.
    ///
    /// Used for suggestions and chips alike. Focus returns to the input and
    /// the suggestion list closes.
    pub fn choose(&mut self, tag: &str) {
        let updated = tags::insert(self.input.value(), tag);
        debug!(tag, buffer = %updated, "Tag chosen");
        self.input.set_value(updated);
        self.focus = Focus::Input;
        self.suggestions.clear();
    }

    /// Give focus to the input.
    ///
    /// Dismissals scheduled by an earlier blur still fire.
    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    /// Move focus to `target`, scheduling a dismissal if the input loses it.
    pub fn blur_to(&mut self, target: Focus, now: Instant) {
        if self.focus == Focus::Input && target != Focus::Input {
            let deadline = now + self.dismiss_delay;
            trace!(delay_ms = self.dismiss_delay.as_millis() as u64, "Dismissal scheduled");
            self.pending_dismissals.push(deadline);
        }
        self.focus = target;
    }

    /// Fire every dismissal whose deadline has passed.
    ///
    /// Returns true if at least one fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.pending_dismissals.len();
        self.pending_dismissals.retain(|deadline| *deadline > now);
        let fired = before - self.pending_dismissals.len();

        if fired > 0 {
            trace!(fired, "Dismissal fired");
            self.suggestions.clear();
        }
        fired > 0
    }

    /// Handle a key press.
    ///
    /// Returns true if the key changed the field. Enter and Esc are left to
    /// the caller when the suggestion list is closed and the input has focus.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if self.focus == Focus::Outside {
            self.focus_input();
        }

        match self.focus {
            Focus::Chips => self.handle_chip_key(key),
            _ => self.handle_input_key(key, now),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match self.suggestions.handle_input(key) {
            Some(SuggestionAction::Choose(tag)) => {
                self.choose(&tag);
                return true;
            }
            Some(SuggestionAction::Moved) => return true,
            None => {}
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) if !self.chips.is_empty() => {
                self.blur_to(Focus::Chips, now);
                true
            }
            (KeyCode::Esc, _) if self.suggestions.is_open() => {
                self.suggestions.clear();
                true
            }
            _ => {
                if self.input.handle_input(key) {
                    self.refresh();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn handle_chip_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                self.focus_input();
            }
            _ => {
                if let Some(tag) = self.chips.handle_input(key) {
                    self.choose(&tag);
                }
            }
        }
        true
    }

    /// Insert pasted text at the cursor and refresh suggestions.
    pub fn handle_paste(&mut self, text: &str) {
        self.focus_input();
        if self.input.insert_str(text) {
            self.refresh();
        }
    }

    /// Handle a mouse event.
    ///
    /// A left press on a suggestion or chip inserts it right away, before
    /// any pending dismissal can close the list. A press on the input
    /// focuses it; a press anywhere else blurs the field. Returns true if
    /// the press landed on the field.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }

        let (column, row) = (mouse.column, mouse.row);

        if let Some(tag) = self.suggestions.entry_at(column, row).map(str::to_string) {
            self.choose(&tag);
            return true;
        }

        if let Some(tag) = self.chips.chip_at(column, row).map(str::to_string) {
            self.choose(&tag);
            return true;
        }

        let on_input = self.input_area.get().is_some_and(|area| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        });
        if on_input {
            self.focus_input();
            return true;
        }

        self.blur_to(Focus::Outside, now);
        false
    }

    /// Key hints for the current state.
    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            Focus::Chips => help_bar::CHIP_HINTS,
            _ if self.suggestions.is_open() => help_bar::SUGGESTION_HINTS,
            _ => help_bar::INPUT_HINTS,
        }
    }

    /// Rows needed by the field, not counting the dropdown overlay.
    pub fn height(&self) -> u16 {
        if self.chips.is_empty() {
            3
        } else {
            4
        }
    }

    /// Draw the input, the chip row and, on top of them, the dropdown.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Chips
                Constraint::Min(0),
            ])
            .split(area);

        self.input
            .render(frame, chunks[0], INPUT_LABEL, self.focus == Focus::Input);
        self.input_area.set(Some(chunks[0]));

        if !self.chips.is_empty() {
            self.chips
                .render(frame, chunks[1], self.focus == Focus::Chips);
        }

        let below = chunks[0].y + chunks[0].height;
        let room = (area.y + area.height).saturating_sub(below);
        let dropdown = Rect::new(
            chunks[0].x,
            below,
            chunks[0].width,
            self.suggestions.height().min(room),
        );
        self.suggestions.render(frame, dropdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    const VOCABULARY: &str = r#"["Go", "Golang", "Rust", "Ruby", "Python", "Docker"]"#;

    fn parts(payload: &str, chips: Vec<PopularChip>) -> TagFieldParts {
        TagFieldParts {
            input: Some(TextInput::new()),
            suggestions: Some(SuggestionList::new()),
            vocabulary: Some(payload.to_string()),
            chips,
        }
    }

    fn field() -> TagField {
        TagField::mount(
            parts(
                VOCABULARY,
                vec![PopularChip::new("Docker"), PopularChip::new("Rust")],
            ),
            &Settings::default(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(field: &mut TagField, text: &str, now: Instant) {
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(field: &TagField) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| field.render(frame, Rect::new(0, 0, 40, 20)))
            .unwrap();
        terminal
    }

    #[test]
    fn test_mount_requires_input() {
        let mut p = parts(VOCABULARY, vec![]);
        p.input = None;
        assert!(TagField::mount(p, &Settings::default()).is_none());
    }

    #[test]
    fn test_mount_requires_suggestions() {
        let mut p = parts(VOCABULARY, vec![]);
        p.suggestions = None;
        assert!(TagField::mount(p, &Settings::default()).is_none());
    }

    #[test]
    fn test_mount_requires_vocabulary_payload() {
        let mut p = parts(VOCABULARY, vec![]);
        p.vocabulary = None;
        assert!(TagField::mount(p, &Settings::default()).is_none());
    }

    #[test]
    fn test_mount_without_chips() {
        let field = TagField::mount(parts(VOCABULARY, vec![]), &Settings::default()).unwrap();
        assert!(field.chips().is_empty());
        assert_eq!(field.vocabulary().len(), 6);
        assert_eq!(field.height(), 3);
    }

    #[test]
    fn test_invalid_payload_mounts_with_empty_vocabulary() {
        let mut field =
            TagField::mount(parts("not json", vec![]), &Settings::default()).unwrap();
        assert!(field.vocabulary().is_empty());

        type_text(&mut field, "go", Instant::now());
        assert!(!field.is_open());
    }

    #[test]
    fn test_initial_state_closed() {
        let field = field();
        assert!(!field.is_open());
        assert_eq!(field.focus(), Focus::Input);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_typing_opens_suggestions() {
        let mut field = field();
        type_text(&mut field, "GO", Instant::now());

        assert!(field.is_open());
        assert_eq!(field.suggestions().entries(), &["Go".to_string(), "Golang".to_string()]);
    }

    #[test]
    fn test_suggestions_follow_current_token() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go, ru", now);

        assert_eq!(
            field.suggestions().entries(),
            &["Rust".to_string(), "Ruby".to_string()]
        );

        // The separator starts a new, empty token.
        type_text(&mut field, ",", now);
        assert!(!field.is_open());
    }

    #[test]
    fn test_no_match_closes() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "ru", now);
        assert!(field.is_open());

        type_text(&mut field, "x", now);
        assert!(!field.is_open());
    }

    #[test]
    fn test_backspace_to_empty_closes() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "r", now);
        assert!(field.is_open());

        field.handle_key(key(KeyCode::Backspace), now);
        assert!(!field.is_open());
    }

    #[test]
    fn test_whitespace_query_shows_nothing() {
        let mut field = field();
        type_text(&mut field, "   ", Instant::now());
        assert!(!field.is_open());
    }

    #[test]
    fn test_max_suggestions_setting() {
        let settings = Settings {
            max_suggestions: 1,
            ..Settings::default()
        };
        let mut field = TagField::mount(parts(VOCABULARY, vec![]), &settings).unwrap();
        type_text(&mut field, "go", Instant::now());
        assert_eq!(field.suggestions().entries(), &["Go".to_string()]);
    }

    #[test]
    fn test_enter_inserts_highlighted_suggestion() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go, ru", now);
        field.handle_key(key(KeyCode::Down), now);

        assert!(field.handle_key(key(KeyCode::Enter), now));
        assert_eq!(field.value(), "go, Ruby, ");
        assert!(!field.is_open());
    }

    #[test]
    fn test_enter_with_closed_list_is_not_consumed() {
        let mut field = field();
        assert!(!field.handle_key(key(KeyCode::Enter), Instant::now()));
    }

    #[test]
    fn test_choose_deduplicates() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go, GO", now);
        field.handle_key(key(KeyCode::Enter), now);

        assert_eq!(field.value(), "go, ");
    }

    #[test]
    fn test_esc_closes_open_list_only() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "py", now);

        assert!(field.handle_key(key(KeyCode::Esc), now));
        assert!(!field.is_open());
        assert_eq!(field.value(), "py");

        assert!(!field.handle_key(key(KeyCode::Esc), now));
    }

    #[test]
    fn test_chip_inserts_like_suggestion() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go, do", now);

        field.handle_key(key(KeyCode::Tab), now);
        assert_eq!(field.focus(), Focus::Chips);

        field.handle_key(key(KeyCode::Right), now);
        field.handle_key(key(KeyCode::Enter), now);

        assert_eq!(field.value(), "go, Rust, ");
        assert_eq!(field.focus(), Focus::Input);
        assert!(!field.is_open());
    }

    #[test]
    fn test_chip_focus_consumes_keys() {
        let mut field = field();
        let now = Instant::now();
        field.handle_key(key(KeyCode::Tab), now);
        assert!(field.handle_key(key(KeyCode::Char('x')), now));
        assert_eq!(field.value(), "");

        field.handle_key(key(KeyCode::Esc), now);
        assert_eq!(field.focus(), Focus::Input);
    }

    #[test]
    fn test_tab_without_chips_is_not_consumed() {
        let mut field = TagField::mount(parts(VOCABULARY, vec![]), &Settings::default()).unwrap();
        assert!(!field.handle_key(key(KeyCode::Tab), Instant::now()));
        assert_eq!(field.focus(), Focus::Input);
    }

    #[test]
    fn test_blur_dismisses_after_delay() {
        let mut field = field();
        let t0 = Instant::now();
        type_text(&mut field, "go", t0);

        field.blur_to(Focus::Outside, t0);
        assert!(field.is_open());
        assert_eq!(field.pending_dismissals(), 1);

        assert!(!field.tick(t0 + Duration::from_millis(100)));
        assert!(field.is_open());

        assert!(field.tick(t0 + Duration::from_millis(150)));
        assert!(!field.is_open());
        assert_eq!(field.pending_dismissals(), 0);
    }

    #[test]
    fn test_blur_from_chips_schedules_nothing() {
        let mut field = field();
        let t0 = Instant::now();
        field.handle_key(key(KeyCode::Tab), t0);
        assert_eq!(field.pending_dismissals(), 1);

        field.blur_to(Focus::Outside, t0);
        assert_eq!(field.pending_dismissals(), 1);
    }

    #[test]
    fn test_dismissal_is_not_cancelled_by_refocus() {
        let mut field = field();
        let t0 = Instant::now();
        type_text(&mut field, "go", t0);

        field.blur_to(Focus::Outside, t0);
        field.focus_input();
        field.blur_to(Focus::Outside, t0 + Duration::from_millis(50));
        assert_eq!(field.pending_dismissals(), 2);

        field.focus_input();
        type_text(&mut field, "l", t0 + Duration::from_millis(60));
        assert!(field.is_open());

        assert!(field.tick(t0 + Duration::from_millis(160)));
        assert!(!field.is_open());
        assert_eq!(field.pending_dismissals(), 1);

        assert!(field.tick(t0 + Duration::from_millis(210)));
        assert!(!field.is_open());
        assert_eq!(field.pending_dismissals(), 0);
    }

    #[test]
    fn test_click_on_suggestion_inserts() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go", now);
        let _terminal = draw(&field);

        // Input occupies rows 0..3; the dropdown border is row 3, the
        // entries start on row 4.
        assert!(field.handle_mouse(click(2, 5), now));
        assert_eq!(field.value(), "Golang, ");
        assert!(!field.is_open());
    }

    #[test]
    fn test_click_selection_wins_over_pending_dismissal() {
        let mut field = field();
        let t0 = Instant::now();
        type_text(&mut field, "ru", t0);
        let _terminal = draw(&field);

        // The terminal reports focus loss just before the click lands.
        field.blur_to(Focus::Outside, t0);
        assert!(field.handle_mouse(click(2, 4), t0 + Duration::from_millis(20)));
        assert_eq!(field.value(), "Rust, ");

        field.tick(t0 + Duration::from_millis(150));
        assert_eq!(field.value(), "Rust, ");
        assert!(!field.is_open());
    }

    #[test]
    fn test_click_on_chip_inserts() {
        let mut field = field();
        let now = Instant::now();
        let _terminal = draw(&field);

        // Chip row is row 3: "Popular: " then " Docker ".
        assert!(field.handle_mouse(click(10, 3), now));
        assert_eq!(field.value(), "Docker, ");
    }

    #[test]
    fn test_click_outside_blurs() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "go", now);
        let _terminal = draw(&field);

        assert!(!field.handle_mouse(click(39, 19), now));
        assert_eq!(field.focus(), Focus::Outside);
        assert_eq!(field.pending_dismissals(), 1);
    }

    #[test]
    fn test_click_on_input_focuses() {
        let mut field = field();
        let now = Instant::now();
        let _terminal = draw(&field);
        field.blur_to(Focus::Outside, now);

        assert!(field.handle_mouse(click(5, 1), now));
        assert_eq!(field.focus(), Focus::Input);
    }

    #[test]
    fn test_mouse_release_ignored() {
        let mut field = field();
        let mut release = click(5, 1);
        release.kind = MouseEventKind::Up(MouseButton::Left);
        assert!(!field.handle_mouse(release, Instant::now()));
    }

    #[test]
    fn test_key_after_outside_refocuses_input() {
        let mut field = field();
        let now = Instant::now();
        field.blur_to(Focus::Outside, now);
        field.handle_key(key(KeyCode::Char('g')), now);

        assert_eq!(field.focus(), Focus::Input);
        assert_eq!(field.value(), "g");
    }

    #[test]
    fn test_paste_refreshes() {
        let mut field = field();
        field.handle_paste("rust, doc");
        assert_eq!(field.value(), "rust, doc");
        assert_eq!(field.suggestions().entries(), &["Docker".to_string()]);
    }

    #[test]
    fn test_hints_follow_state() {
        let mut field = field();
        let now = Instant::now();
        assert_eq!(field.hints(), help_bar::INPUT_HINTS);

        type_text(&mut field, "go", now);
        assert_eq!(field.hints(), help_bar::SUGGESTION_HINTS);

        field.handle_key(key(KeyCode::Tab), now);
        assert_eq!(field.hints(), help_bar::CHIP_HINTS);
    }

    #[test]
    fn test_inserted_buffer_awaits_next_tag() {
        let mut field = field();
        let now = Instant::now();
        type_text(&mut field, "py", now);
        field.handle_key(key(KeyCode::Enter), now);

        assert_eq!(tags::parse(field.value()).current, "");
        type_text(&mut field, "do", now);
        assert_eq!(field.suggestions().entries(), &["Docker".to_string()]);
    }
}

//! Main application state.
//!
//! The app follows The Elm Architecture: [`App::update`] applies one event,
//! [`App::view`] draws the result. All time-dependent behavior takes the
//! current instant as an argument so it can be driven from tests.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::Event;
use crate::tags;
use crate::ui::{render_hints, theme::theme, Focus, TagField};

/// Hints shown when the tag field did not mount.
const UNMOUNTED_HINTS: &[(&str, &str)] = &[("Enter", "submit"), ("Esc", "quit")];

/// The current state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The user is editing tags.
    #[default]
    Editing,
    /// The tags were submitted.
    Submitted,
    /// The application is exiting without submitting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    /// The current state.
    state: AppState,
    /// The tag field, absent if its parts were missing.
    field: Option<TagField>,
    /// Whether leading `#` is removed on submission.
    strip_hash_prefix: bool,
    /// Tags collected on submission.
    submitted: Option<Vec<String>>,
}

impl App {
    /// Create the application around a (possibly unmounted) tag field.
    pub fn new(field: Option<TagField>, settings: &Settings) -> Self {
        debug!(mounted = field.is_some(), "Creating application");
        Self {
            state: AppState::Editing,
            field,
            strip_hash_prefix: settings.strip_hash_prefix,
            submitted: None,
        }
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Returns whether the event loop should stop.
    pub fn should_quit(&self) -> bool {
        self.state != AppState::Editing
    }

    /// The tag field, if mounted.
    pub fn field(&self) -> Option<&TagField> {
        self.field.as_ref()
    }

    /// The submitted tags, if the user submitted.
    pub fn submitted_tags(&self) -> Option<&[String]> {
        self.submitted.as_deref()
    }

    /// Consume the app and return the submitted tags.
    pub fn into_submitted(self) -> Option<Vec<String>> {
        self.submitted
    }

    /// Apply one event.
    ///
    /// Pending dismissals are checked after the event itself, so a selection
    /// arriving in the same batch as an expired deadline is applied first.
    pub fn update(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key, now);
            }
            Event::Mouse(mouse) => {
                if let Some(field) = self.field.as_mut() {
                    field.handle_mouse(mouse, now);
                }
            }
            Event::Paste(text) => {
                if let Some(field) = self.field.as_mut() {
                    field.handle_paste(&text);
                }
            }
            Event::FocusLost => {
                trace!("Terminal lost focus");
                if let Some(field) = self.field.as_mut() {
                    field.blur_to(Focus::Outside, now);
                }
            }
            Event::FocusGained => {
                if let Some(field) = self.field.as_mut() {
                    if field.focus() == Focus::Outside {
                        field.focus_input();
                    }
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }

        if let Some(field) = self.field.as_mut() {
            field.tick(now);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                info!("Quit without submitting");
                self.state = AppState::Exiting;
                return;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.submit();
                return;
            }
            _ => {}
        }

        let consumed = match self.field.as_mut() {
            Some(field) => field.handle_key(key, now),
            None => false,
        };
        if consumed {
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                info!("Quit without submitting");
                self.state = AppState::Exiting;
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let value = self.field.as_ref().map(TagField::value).unwrap_or("");
        let tags = tags::collect_tags(value, self.strip_hash_prefix);
        info!(count = tags.len(), "Tags submitted");
        self.submitted = Some(tags);
        self.state = AppState::Submitted;
    }

    /// Render the application.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Field
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let hints = match self.field.as_ref() {
            Some(field) => {
                field.render(frame, chunks[1]);
                field.hints()
            }
            None => {
                self.render_unmounted(frame, chunks[1]);
                UNMOUNTED_HINTS
            }
        };

        render_hints(frame, chunks[2], hints);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Line::from(vec![
            Span::styled(
                "Add tags",
                Style::default().fg(t.focus).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  separate with commas", Style::default().fg(t.muted)),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_unmounted(&self, frame: &mut Frame, area: Rect) {
        let message = Paragraph::new("Tag input unavailable.")
            .style(Style::default().fg(theme().muted));
        frame.render_widget(message, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::PopularChip;
    use crate::ui::{SuggestionList, TagFieldParts, TextInput};
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    const VOCABULARY: &str = r#"["Go", "Golang", "Rust", "Docker"]"#;

    fn app_with(value: &str) -> App {
        let settings = Settings::default();
        let field = TagField::mount(
            TagFieldParts {
                input: Some(TextInput::with_value(value)),
                suggestions: Some(SuggestionList::new()),
                vocabulary: Some(VOCABULARY.to_string()),
                chips: vec![PopularChip::new("Docker")],
            },
            &settings,
        );
        App::new(field, &settings)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)), now);
        }
    }

    fn is_open(app: &App) -> bool {
        app.field().map(TagField::is_open).unwrap_or(false)
    }

    #[test]
    fn test_app_initial_state() {
        let app = app_with("");
        assert_eq!(app.state(), AppState::Editing);
        assert!(!app.should_quit());
        assert!(app.submitted_tags().is_none());
    }

    #[test]
    fn test_ctrl_c_quits_without_submitting() {
        let mut app = app_with("go, rust");
        app.update(ctrl('c'), Instant::now());
        assert_eq!(app.state(), AppState::Exiting);
        assert!(app.should_quit());
        assert!(app.submitted_tags().is_none());
    }

    #[test]
    fn test_ctrl_s_submits_even_with_open_list() {
        let mut app = app_with("");
        let now = Instant::now();
        type_text(&mut app, "#go, rust, GO, ", now);
        type_text(&mut app, "do", now);
        assert!(is_open(&app));

        app.update(ctrl('s'), now);
        assert_eq!(app.state(), AppState::Submitted);
        assert_eq!(
            app.submitted_tags(),
            Some(&["go".to_string(), "rust".to_string(), "do".to_string()][..])
        );
    }

    #[test]
    fn test_enter_inserts_then_submits() {
        let mut app = app_with("");
        let now = Instant::now();
        type_text(&mut app, "ru", now);

        app.update(key(KeyCode::Enter), now);
        assert_eq!(app.state(), AppState::Editing);
        assert_eq!(app.field().map(TagField::value), Some("Rust, "));

        app.update(key(KeyCode::Enter), now);
        assert_eq!(app.state(), AppState::Submitted);
        assert_eq!(app.into_submitted(), Some(vec!["Rust".to_string()]));
    }

    #[test]
    fn test_esc_closes_list_then_quits() {
        let mut app = app_with("");
        let now = Instant::now();
        type_text(&mut app, "go", now);

        app.update(key(KeyCode::Esc), now);
        assert_eq!(app.state(), AppState::Editing);
        assert!(!is_open(&app));

        app.update(key(KeyCode::Esc), now);
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_focus_lost_dismisses_after_delay() {
        let mut app = app_with("");
        let t0 = Instant::now();
        type_text(&mut app, "go", t0);

        app.update(Event::FocusLost, t0);
        app.update(Event::Tick, t0 + Duration::from_millis(149));
        assert!(is_open(&app));

        app.update(Event::Tick, t0 + Duration::from_millis(150));
        assert!(!is_open(&app));
    }

    #[test]
    fn test_focus_gained_restores_input() {
        let mut app = app_with("");
        let now = Instant::now();
        app.update(Event::FocusLost, now);
        assert_eq!(app.field().map(TagField::focus), Some(Focus::Outside));

        app.update(Event::FocusGained, now);
        assert_eq!(app.field().map(TagField::focus), Some(Focus::Input));
    }

    #[test]
    fn test_late_click_still_selects() {
        let mut app = app_with("");
        let t0 = Instant::now();
        type_text(&mut app, "go", t0);

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        // Header row 0, input rows 1..4, dropdown border row 4, entries 5..
        app.update(Event::FocusLost, t0);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        app.update(Event::Mouse(click), t0 + Duration::from_millis(200));

        assert_eq!(app.field().map(TagField::value), Some("Go, "));
        assert!(!is_open(&app));
    }

    #[test]
    fn test_paste_goes_to_field() {
        let mut app = app_with("go, ");
        app.update(Event::Paste("rust, dock".to_string()), Instant::now());
        assert_eq!(app.field().map(TagField::value), Some("go, rust, dock"));
        assert!(is_open(&app));
    }

    #[test]
    fn test_unmounted_field() {
        let mut app = App::new(None, &Settings::default());
        let now = Instant::now();
        app.update(key(KeyCode::Char('x')), now);
        assert_eq!(app.state(), AppState::Editing);

        app.update(key(KeyCode::Enter), now);
        assert_eq!(app.state(), AppState::Submitted);
        assert_eq!(app.submitted_tags(), Some(&[][..]));
    }

    #[test]
    fn test_view_draws_help_bar() {
        let app = app_with("");
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let last: String = buffer.content[7 * 60..8 * 60]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(last.contains("[Tab]"));

        let first: String = buffer.content[..60].iter().map(|cell| cell.symbol()).collect();
        assert!(first.contains("Add tags"));
    }

    #[test]
    fn test_strip_hash_setting() {
        let settings = Settings {
            strip_hash_prefix: false,
            ..Settings::default()
        };
        let field = TagField::mount(
            TagFieldParts {
                input: Some(TextInput::with_value("#go, rust")),
                suggestions: Some(SuggestionList::new()),
                vocabulary: Some("[]".to_string()),
                chips: Vec::new(),
            },
            &settings,
        );
        let mut app = App::new(field, &settings);
        app.update(ctrl('s'), Instant::now());
        assert_eq!(
            app.into_submitted(),
            Some(vec!["#go".to_string(), "rust".to_string()])
        );
    }
}

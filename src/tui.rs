//! Terminal setup and the event loop.
//!
//! The interface is drawn on stderr so stdout stays free for the submitted
//! tags, e.g. `tagfield --vocabulary tags.json | xargs`.

use std::io::{self, IsTerminal};
use std::time::Instant;

use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::app::App;
use crate::error::{AppError, Result};
use crate::events::EventHandler;

/// Restores the terminal when dropped, including during a panic unwind.
///
/// A terminal left in raw mode or on the alternate screen is unusable, so
/// every mode enabled by [`TerminalGuard::new`] is undone here.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };

        execute!(
            io::stderr(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            EnableBracketedPaste
        )?;
        guard.alternate_screen_enabled = true;

        Ok(guard)
    }

    /// Restore the terminal now. Dropping afterwards does nothing.
    fn restore(&mut self) -> Result<()> {
        if self.alternate_screen_enabled {
            execute!(
                io::stderr(),
                DisableBracketedPaste,
                DisableFocusChange,
                DisableMouseCapture,
                LeaveAlternateScreen
            )?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already cleaning up; errors have nowhere to go.
        if self.alternate_screen_enabled {
            let _ = execute!(
                io::stderr(),
                DisableBracketedPaste,
                DisableFocusChange,
                DisableMouseCapture,
                LeaveAlternateScreen
            );
        }
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
    }
}

/// Run `app` until the user submits or quits, then give it back.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or read from.
pub fn run(mut app: App, events: &EventHandler) -> Result<App> {
    if !io::stderr().is_terminal() {
        return Err(AppError::terminal("standard error is not a terminal"));
    }

    let mut guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    debug!(tick_rate_ms = events.tick_rate().as_millis() as u64, "Event loop started");

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event, Instant::now());
    }

    terminal.show_cursor()?;
    guard.restore()?;
    info!(state = ?app.state(), "Event loop finished");
    Ok(app)
}

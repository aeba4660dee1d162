//! tagfield - comma-separated tag input with autocomplete.
//!
//! The [`tags`] module is the pure engine: tokenizing the buffer, matching
//! the current token against a vocabulary and inserting a chosen tag. The
//! rest is a terminal front end built on ratatui.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tags;
pub mod tui;
pub mod ui;

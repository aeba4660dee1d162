//! Tag field settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::tags::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_POPULAR_LIMIT};

/// Default delay between the input losing focus and the list closing.
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 150;

/// Default event loop tick rate.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Tunables for the tag field and the application around it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of suggestions shown for one query.
    pub max_suggestions: usize,
    /// Milliseconds between blur and dismissal of the suggestion list.
    ///
    /// Must stay long enough for a click on a suggestion to land first.
    pub dismiss_delay_ms: u64,
    /// Maximum number of popular tag chips.
    pub popular_limit: usize,
    /// Whether leading `#` characters are removed from submitted tags.
    pub strip_hash_prefix: bool,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            dismiss_delay_ms: DEFAULT_DISMISS_DELAY_MS,
            popular_limit: DEFAULT_POPULAR_LIMIT,
            strip_hash_prefix: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Settings {
    /// The blur dismissal delay.
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    /// The event loop tick rate.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if `max_suggestions` or
    /// `tick_rate_ms` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(ConfigError::ValidationError(
                "max_suggestions must be at least 1".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

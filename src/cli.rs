//! Command line interface.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, warn};

use crate::config::{Config, Settings};
use crate::error::{AppError, Result};
use crate::tags::{rank_popular, PopularChip};

/// Vocabulary used when no file is given.
const EMPTY_VOCABULARY: &str = "[]";

#[derive(Parser, Debug)]
#[command(name = "tagfield")]
#[command(about = "Comma-separated tag input with autocomplete")]
#[command(version)]
pub struct Cli {
    /// JSON file with the known tags, an array of strings
    #[arg(short, long)]
    pub vocabulary: Option<PathBuf>,

    /// JSON file with popular tag counts, e.g. {"rust": 42}
    #[arg(short, long)]
    pub popular: Option<PathBuf>,

    /// Initial buffer contents
    #[arg(long, default_value = "")]
    pub value: String,

    /// Maximum number of suggestions shown
    #[arg(long)]
    pub max_suggestions: Option<usize>,

    /// Milliseconds between blur and closing the suggestion list
    #[arg(long)]
    pub dismiss_delay_ms: Option<u64>,

    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print submitted tags as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    pub write_config: bool,

    /// Log suggestion refreshes and dismissals (trace level for the UI)
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Load configuration.
    ///
    /// An explicit `--config` must load cleanly. Problems with the default
    /// location are logged and defaults are used instead.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Ok(Config::load_from(path)?),
            None => Ok(Config::load().unwrap_or_else(|e| {
                warn!("Failed to load config, using default: {}", e);
                Config::default()
            })),
        }
    }

    /// Where `--write-config` writes: `--config` if given, else the default.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::path()?),
        }
    }

    /// Save `config` to [`Cli::config_path`] and return the path written.
    pub fn save_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.config_path()?;
        config.save_to(&path)?;
        info!(path = %path.display(), "Config written");
        Ok(path)
    }

    /// Apply command line overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(max) = self.max_suggestions {
            settings.max_suggestions = max;
        }
        if let Some(delay) = self.dismiss_delay_ms {
            settings.dismiss_delay_ms = delay;
        }
    }

    /// The raw vocabulary payload. Without `--vocabulary` this is an empty
    /// array, so the field still mounts.
    pub fn vocabulary_payload(&self) -> Result<String> {
        match &self.vocabulary {
            Some(path) => {
                debug!(path = %path.display(), "Reading vocabulary");
                Ok(fs::read_to_string(path)?)
            }
            None => Ok(EMPTY_VOCABULARY.to_string()),
        }
    }

    /// Popular chips from `--popular`, best first.
    pub fn popular_chips(&self, limit: usize) -> Result<Vec<PopularChip>> {
        match &self.popular {
            Some(path) => {
                debug!(path = %path.display(), "Reading popular tags");
                Ok(parse_popular(&fs::read_to_string(path)?, limit))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Parse a `{ "tag": count }` object into ranked chips.
///
/// An invalid payload is logged and yields no chips.
pub fn parse_popular(payload: &str, limit: usize) -> Vec<PopularChip> {
    match serde_json::from_str::<HashMap<String, u64>>(payload) {
        Ok(counts) => rank_popular(counts, limit),
        Err(e) => {
            warn!(error = %e, "Popular tags payload is not a JSON object of counts");
            Vec::new()
        }
    }
}

/// Format submitted tags for stdout: one per line, or a JSON array.
pub fn format_output(tags: &[String], json: bool) -> Result<String> {
    if json {
        serde_json::to_string(tags)
            .map_err(|e| AppError::other(format!("Failed to encode tags: {}", e)))
    } else {
        Ok(tags.join("\n"))
    }
}

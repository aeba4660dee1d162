//! Logging to a daily-rotated file.
//!
//! The UI owns the terminal, so nothing is ever logged to stdout or stderr.
//! `RUST_LOG` wins over the built-in filters.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// File name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "tagfield.log";

/// Filter without `--verbose`.
const QUIET_FILTER: &str = "tagfield=info,warn";

/// Filter with `--verbose`: every suggestion refresh, render and dismissal.
const VERBOSE_FILTER: &str = "tagfield=debug,tagfield::ui=trace,warn";

/// Install the global subscriber and return the log directory.
///
/// Files land in `tagfield/logs` under the platform local data directory
/// (`~/.local/share` on Linux).
///
/// # Errors
///
/// Fails if the log directory cannot be determined or created, or if a
/// global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<PathBuf> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        verbose,
        "tagfield starting up"
    );
    Ok(dir)
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        QUIET_FILTER
    }
}

fn log_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base.join("tagfield").join("logs"))
}

/// Where log files are written, shown to the user when a run fails.
pub fn log_directory() -> Option<PathBuf> {
    log_dir().ok()
}

/// Log a clean exit.
pub fn shutdown() {
    tracing::info!("tagfield shutting down");
}

//! Tracing setup for the blog server.
//!
//! Events are written to stdout and appended to the configured log file, so
//! restarting the server keeps earlier runs' history. `RUST_LOG`, when set,
//! overrides the configured level.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{BlogError, Result};

/// Map a configured level name to a tracing level, defaulting to INFO.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter for the blog's own events; sqlx statement logging stays at warn.
fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_ascii_lowercase();
        EnvFilter::new(format!("{level},sqlx=warn"))
    })
}

/// Open the log file for appending, creating it and its directory if needed.
pub fn open_log_file(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber writing to stdout and the log file.
///
/// Fails if the file cannot be opened or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = Arc::new(open_log_file(&config.file)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(parse_level(&config.level)))
        .try_init()
        .map_err(|e| BlogError::Config(format!("logging: {e}")))
}

/// Install a stdout-only subscriber, used when the log file is unavailable.
pub fn init_console_only(level: &str) {
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(build_filter(parse_level(level)));

    // Leaves any subscriber that is already installed in place.
    let _ = subscriber.try_init();
}

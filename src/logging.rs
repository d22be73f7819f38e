//! Structured logging setup using `tracing-subscriber` and `tracing-appender`.
//!
//! Two modes:
//! - **Production** ([`init_production`]): JSON file layer (daily rotation) + console layer
//! - **CLI** ([`init_cli`]): console-only for one-shot subcommands

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{data_dir, LoggingConfig};

/// Holds the non-blocking writer guard for file logging.
///
/// The [`WorkerGuard`] must be kept alive for the duration of the process.
/// Dropping it flushes pending log entries and closes the file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Resolve the log directory: the configured override, or `logs/` under
/// the application data directory.
///
/// # Errors
///
/// Returns an error if no override is set and the home directory cannot
/// be determined.
pub fn logs_dir(config: &LoggingConfig) -> anyhow::Result<PathBuf> {
    match config.dir {
        Some(ref dir) => Ok(dir.clone()),
        None => Ok(data_dir()?.join("logs")),
    }
}

/// Initialise logging for the `run` subcommand (production mode).
///
/// Writes JSON logs to `straylight.log.YYYY-MM-DD` in the resolved log
/// directory with daily rotation, and emits human-readable output to
/// stderr controlled by `RUST_LOG` (default: `info`).
///
/// Returns a [`LoggingGuard`] that must be kept alive for log flushing.
///
/// # Errors
///
/// Returns an error if the log directory cannot be resolved or created.
pub fn init_production(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let dir = logs_dir(config)?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| anyhow::anyhow!("failed to create logs directory {}: {e}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&dir, "straylight.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking);

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(console_layer)
        .init();

    Ok(LoggingGuard { _guard: guard })
}

/// Initialise minimal logging for non-`run` subcommands (CLI mode).
///
/// Emits human-readable output to stderr only. No file rotation.
/// Controlled by `RUST_LOG` (default: `info`).
pub fn init_cli() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

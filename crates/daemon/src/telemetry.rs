//! Logging setup
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `pincrawl=info`)
//! - `PINCRAWL_LOG_FORMAT`: `json` for JSON lines, anything else for pretty output
//! - `PINCRAWL_LOG_DIR`: when set, also write a daily-rolling log file there
//!
//! # Example
//!
//! ```text
//! RUST_LOG=pincrawl=debug PINCRAWL_LOG_DIR=/mnt/sdcard/logs ./pincrawl
//! ```

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DaemonConfig, LogFormat};

const DEFAULT_FILTER: &str = "pincrawl=info";
const LOG_FILE_PREFIX: &str = "pincrawl.log";

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process.
pub fn init_logging(config: &DaemonConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let (file_writer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    match config.log_format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(file_writer.map(|w| fmt::layer().json().with_writer(w)))
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors, plain text to file
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .with(file_writer.map(|w| fmt::layer().with_ansi(false).with_writer(w)))
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
    }

    Ok(guard)
}

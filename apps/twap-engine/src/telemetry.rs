//! Logging setup.
//!
//! Console output goes to stderr so stdout carries only the rendered report.
//! An optional rolling file receives JSON lines, including the `audit` target.
//!
//! # Usage
//!
//! ```rust,ignore
//! use twap_engine::telemetry::init_logging;
//!
//! let _guard = init_logging(&config.logging)?;
//! ```

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFileConfig, LogFormat, LogRotation, LoggingConfig};

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create log directory.
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Keeps the file writer flushing. Hold it until exit.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `config.level` when set.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = Vec::new();

    let console = fmt::layer().with_writer(std::io::stderr).with_target(true);
    match config.format {
        LogFormat::Pretty => layers.push(Box::new(console)),
        LogFormat::Json => layers.push(Box::new(console.json().flatten_event(true))),
    }

    let mut guard = LoggingGuard::default();
    if let Some(file) = &config.file {
        let (writer, file_guard) = tracing_appender::non_blocking(file_appender(file)?);
        layers.push(Box::new(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .json()
                .flatten_event(true),
        ));
        guard._file = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

fn file_appender(file: &LogFileConfig) -> Result<RollingFileAppender, LoggingError> {
    let directory = Path::new(&file.directory);
    std::fs::create_dir_all(directory)?;

    let appender = match file.rotation {
        LogRotation::Hourly => rolling::hourly(directory, &file.file_name),
        LogRotation::Daily => rolling::daily(directory, &file.file_name),
        LogRotation::Never => rolling::never(directory, &file.file_name),
    };
    Ok(appender)
}

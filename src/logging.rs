//! Tracing subscriber setup.
//!
//! Headless modes log to stderr and, when configured, a log file. The
//! interactive terminal application owns the screen, so it only ever logs to
//! the file.

use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::feedback::FeedbackError;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "KUDOS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where log output may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSurface {
    /// stderr is free; the terminal is not in use.
    Headless,
    /// The terminal is in use; only the log file may receive output.
    Interactive,
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `KUDOS_LOG`, then `RUST_LOG`, then defaults to
/// `info`.
///
/// # Errors
///
/// Returns [`FeedbackError::Configuration`] when the log file path has no
/// file name or a global subscriber is already installed.
pub fn init_logging(log_file: Option<&str>, surface: LogSurface) -> Result<(), FeedbackError> {
    let stderr_layer = (surface == LogSurface::Headless).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter())
    });

    let file_layer = match log_file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            let file_appender = tracing_appender::rolling::never(directory, file_name);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| FeedbackError::Configuration {
            message: format!("failed to initialise logging: {error}"),
        })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn split_log_path(path: &str) -> Result<(PathBuf, PathBuf), FeedbackError> {
    let log_path = Path::new(path.trim());
    let file_name = log_path
        .file_name()
        .ok_or_else(|| FeedbackError::Configuration {
            message: format!("log file path '{path}' does not name a file"),
        })?;
    let directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok((directory, PathBuf::from(file_name)))
}

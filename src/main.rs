//! Kudos CLI entrypoint.
//!
//! Loads layered configuration, installs logging for the chosen surface, and
//! dispatches to the migration, listing, or interactive mode.

use std::io::{self, Write};
use std::process::ExitCode;

use kudos::logging::{LogSurface, init_logging};
use kudos::{FeedbackError, KudosConfig, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), FeedbackError> {
    let config = load_config()?;
    let mode = config.operation_mode();

    let surface = match mode {
        OperationMode::Interactive => LogSurface::Interactive,
        OperationMode::MigrateDatabase | OperationMode::ListFeedback => LogSurface::Headless,
    };
    init_logging(config.log_file.as_deref(), surface)?;
    tracing::debug!(?mode, "starting kudos");

    match mode {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::ListFeedback => cli::listing::run(&config).await,
        OperationMode::Interactive => cli::interactive::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FeedbackError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<KudosConfig, FeedbackError> {
    KudosConfig::load().map_err(|error| FeedbackError::Configuration {
        message: error.to_string(),
    })
}

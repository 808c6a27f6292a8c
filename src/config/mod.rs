//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.kudos.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `KUDOS_BACKEND_URL`, `KUDOS_API_KEY`, or
//!    `SUPABASE_ANON_KEY` for the key
//! 4. **Command-line arguments** – `--backend-url`/`-b`, `--api-key`/`-k`, ...
//!
//! # Configuration File
//!
//! ```toml
//! backend_url = "https://abc.supabase.co"
//! api_key = "anon-key"
//! table = "feedback"
//! log_file = "kudos.log"
//! ```
//!
//! or, to run against a local database:
//!
//! ```toml
//! database_url = "kudos.sqlite"
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackError, RestGatewaySettings};

/// Fallback environment variable consulted for the REST API key.
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

const DEFAULT_TABLE: &str = "feedback";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 20;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply database migrations and exit.
    MigrateDatabase,
    /// Print every feedback entry and exit.
    ListFeedback,
    /// Run the terminal form and review list.
    Interactive,
}

/// Backend chosen from the configured connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    /// Hosted PostgREST/Supabase table.
    Rest(RestGatewaySettings),
    /// Local `SQLite` database at the given path.
    Sqlite {
        /// Diesel connection string (a filesystem path).
        database_url: String,
    },
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `KUDOS_BACKEND_URL` or `--backend-url`: hosted project base URL
/// - `KUDOS_API_KEY`, `SUPABASE_ANON_KEY`, or `--api-key`: REST API key
/// - `KUDOS_TABLE` or `--table`: REST table name
/// - `KUDOS_DATABASE_URL` or `--database-url`: Local `SQLite` database path
/// - `KUDOS_LOG_FILE` or `--log-file`: tracing log destination
///
/// # Example
///
/// ```no_run
/// use kudos::KudosConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = KudosConfig::load().expect("failed to load configuration");
/// let backend = config.backend().expect("a backend must be configured");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "KUDOS",
    discovery(
        dotfile_name = ".kudos.toml",
        config_file_name = "kudos.toml",
        app_name = "kudos"
    )
)]
pub struct KudosConfig {
    /// Base URL of the hosted PostgREST/Supabase project.
    ///
    /// Can be provided via:
    /// - CLI: `--backend-url <URL>` or `-b <URL>`
    /// - Environment: `KUDOS_BACKEND_URL`
    /// - Config file: `backend_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub backend_url: Option<String>,

    /// API key sent as `apikey` and bearer token.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>` or `-k <KEY>`
    /// - Environment: `KUDOS_API_KEY` or `SUPABASE_ANON_KEY`
    /// - Config file: `api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub api_key: Option<String>,

    /// Table exposed by the REST backend. Defaults to `feedback`.
    #[ortho_config()]
    pub table: String,

    /// Local `SQLite` database URL/path used when no backend URL is set.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `KUDOS_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// Prints every feedback entry, newest first, and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--list` / `-l`
    /// - Config file: `list = true`
    ///
    /// Note: boolean flags are not read from the environment.
    #[ortho_config(cli_short = 'l')]
    pub list: bool,

    /// File that receives tracing output.
    ///
    /// Interactive mode only logs when this is set so the terminal frame is
    /// never overwritten.
    ///
    /// Can be provided via:
    /// - CLI: `--log-file <PATH>` or `-L <PATH>`
    /// - Environment: `KUDOS_LOG_FILE`
    #[ortho_config(cli_short = 'L')]
    pub log_file: Option<String>,

    /// Timeout applied to each REST request, in seconds. Defaults to 20.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for KudosConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_owned(),
            database_url: None,
            migrate_db: false,
            list: false,
            log_file: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl KudosConfig {
    /// Resolves the API key from configuration or the `SUPABASE_ANON_KEY`
    /// environment variable.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::MissingApiKey`] when no source provides a
    /// non-blank value.
    pub fn resolve_api_key(&self) -> Result<String, FeedbackError> {
        non_blank(self.api_key.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| {
                env::var(SUPABASE_ANON_KEY_ENV)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
            })
            .map(|value| value.trim().to_owned())
            .ok_or(FeedbackError::MissingApiKey)
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// Migrations take priority over listing; the interactive terminal
    /// application runs otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.list {
            OperationMode::ListFeedback
        } else {
            OperationMode::Interactive
        }
    }

    /// Per-request timeout for the REST backend.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Chooses the persistence backend.
    ///
    /// A backend URL selects the REST backend (and requires an API key);
    /// otherwise a database URL selects the local `SQLite` store.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::Configuration`] when neither backend is
    /// configured, when a configured value is blank, or when the timeout is
    /// zero, and [`FeedbackError::MissingApiKey`] when the REST backend has no
    /// key.
    pub fn backend(&self) -> Result<BackendSelection, FeedbackError> {
        if let Some(base_url) = self.backend_url.as_deref() {
            return self.rest_backend(base_url);
        }

        match self.database_url.as_deref() {
            Some(database_url) => {
                let trimmed = non_blank(Some(database_url)).ok_or_else(|| {
                    FeedbackError::Configuration {
                        message: "database URL must not be blank".to_owned(),
                    }
                })?;
                Ok(BackendSelection::Sqlite {
                    database_url: trimmed.to_owned(),
                })
            }
            None => Err(FeedbackError::Configuration {
                message: "no backend configured (use --backend-url with --api-key, or \
                          --database-url)"
                    .to_owned(),
            }),
        }
    }

    fn rest_backend(&self, base_url: &str) -> Result<BackendSelection, FeedbackError> {
        let trimmed_url =
            non_blank(Some(base_url)).ok_or_else(|| FeedbackError::Configuration {
                message: "backend URL must not be blank".to_owned(),
            })?;
        let table = non_blank(Some(&self.table)).ok_or_else(|| FeedbackError::Configuration {
            message: "table name must not be blank".to_owned(),
        })?;
        if self.request_timeout_seconds == 0 {
            return Err(FeedbackError::Configuration {
                message: "request timeout must be at least one second".to_owned(),
            });
        }

        Ok(BackendSelection::Rest(RestGatewaySettings {
            base_url: trimmed_url.to_owned(),
            api_key: self.resolve_api_key()?,
            table: table.to_owned(),
            timeout: self.request_timeout(),
        }))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests;

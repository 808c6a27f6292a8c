//! Embedded schema migrations for the local feedback database.
//!
//! Migrations are compiled into the binary. Running them is idempotent: a
//! database that is already current only reports its version again.

use diesel::Connection;
use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::PersistenceError;

/// Migrations shipped with the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the migration that creates the `feedback` table.
pub const INITIAL_SCHEMA_VERSION: &str = "20261001000000";

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Latest applied migration version, e.g. `20261001000000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Returns the version digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Applies pending migrations to the database at `database_url` and records
/// the resulting schema version.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL, and
/// connection, migration or version-lookup failures otherwise. Nothing is
/// recorded in telemetry on failure.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<SchemaVersion, PersistenceError> {
    let mut connection = open_connection(database_url)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?;
    tracing::debug!(newly_applied = applied.len(), "migrations complete");

    let version = latest_applied_version(&mut connection)?;
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: version.as_str().to_owned(),
    });
    Ok(version)
}

/// Opens a connection to `database_url` with a busy timeout set.
///
/// Surrounding whitespace is ignored.
pub(crate) fn open_connection(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    let mut connection = SqliteConnection::establish(url).map_err(|error| {
        PersistenceError::ConnectionFailed {
            message: error.to_string(),
        }
    })?;
    connection
        .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
        .map_err(|error| PersistenceError::ConnectionFailed {
            message: format!("could not set busy timeout: {error}"),
        })?;
    Ok(connection)
}

fn latest_applied_version(
    connection: &mut SqliteConnection,
) -> Result<SchemaVersion, PersistenceError> {
    let versions = connection.applied_migrations().map_err(|error| {
        PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        }
    })?;

    versions
        .into_iter()
        .max()
        .map(|version| SchemaVersion(version.to_string()))
        .ok_or(PersistenceError::MissingSchemaVersion)
}

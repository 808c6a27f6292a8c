//! Error types for local persistence operations.

use thiserror::Error;

/// Errors returned while initialising, migrating, or querying the local
/// `SQLite` database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No database URL/path was provided.
    #[error("database URL is required (use --database-url or KUDOS_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The feedback table does not exist yet.
    #[error("database schema is not initialised (run kudos --migrate-db first)")]
    SchemaNotInitialised,

    /// A read query failed or returned an unusable row.
    #[error("failed to query feedback: {message}")]
    QueryFailed {
        /// Error detail from Diesel or row decoding.
        message: String,
    },

    /// An insert failed.
    #[error("failed to write feedback: {message}")]
    WriteFailed {
        /// Error detail from Diesel.
        message: String,
    },
}

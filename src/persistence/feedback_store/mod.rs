//! Feedback table backed by `SQLite`.
//!
//! The store opens a fresh connection per call; callers on the async runtime
//! are expected to run it on a blocking thread.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};
use diesel::sqlite::SqliteConnection;

use crate::feedback::{FeedbackEntry, FeedbackId, NewFeedback, Rating, SortDirection};

use super::PersistenceError;
use super::migrator::open_connection;

const FEEDBACK_TABLE: &str = "feedback";

#[derive(Debug, QueryableByName)]
struct FeedbackRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Nullable<Text>)]
    email: Option<String>,
    #[diesel(sql_type = Integer)]
    rating: i32,
    #[diesel(sql_type = Text)]
    comments: String,
    #[diesel(sql_type = Text)]
    created_at: String,
}

/// SQLite-backed feedback table.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    database_url: String,
}

impl FeedbackStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string.trim().to_owned(),
        })
    }

    /// Inserts a validated feedback record; `id` and `created_at` are
    /// assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn insert(&self, feedback: &NewFeedback) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query("INSERT INTO feedback (name, email, rating, comments) VALUES (?, ?, ?, ?);")
            .bind::<Text, _>(feedback.name())
            .bind::<Nullable<Text>, _>(feedback.email())
            .bind::<Integer, _>(i32::from(feedback.rating().get()))
            .bind::<Text, _>(feedback.comments())
            .execute(&mut connection)
            .map(drop)
            .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Reads every record ordered by `created_at`, breaking ties by `id` in
    /// the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing, the query
    /// fails, or a stored row cannot be decoded.
    pub fn select_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<FeedbackEntry>, PersistenceError> {
        let mut connection = self.establish_connection()?;

        let order = direction.as_sql();
        let query = format!(
            "SELECT id, name, email, rating, comments, created_at FROM feedback \
             ORDER BY created_at {order}, id {order};"
        );

        let rows: Vec<FeedbackRow> = sql_query(query)
            .load(&mut connection)
            .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        rows.into_iter().map(Self::entry_from_row).collect()
    }

    fn entry_from_row(row: FeedbackRow) -> Result<FeedbackEntry, PersistenceError> {
        let rating = Rating::try_from(i64::from(row.rating)).map_err(|error| {
            PersistenceError::QueryFailed {
                message: format!("row {id}: {error}", id = row.id),
            }
        })?;
        let created_at = parse_timestamp(&row.created_at).ok_or_else(|| {
            PersistenceError::QueryFailed {
                message: format!(
                    "row {id}: unrecognised created_at value {value:?}",
                    id = row.id,
                    value = row.created_at
                ),
            }
        })?;

        Ok(FeedbackEntry {
            id: FeedbackId::new(row.id.to_string()),
            name: row.name,
            email: row.email.filter(|email| !email.is_empty()),
            rating,
            comments: row.comments,
            created_at,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        open_connection(&self.database_url)
    }

    fn feedback_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(FEEDBACK_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::feedback_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

/// Accepts RFC 3339 (the column default) and SQLite's `CURRENT_TIMESTAMP`
/// layout, which is UTC without an offset.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

//! Database migration operations.

use kudos::persistence::{PersistenceError, migrate_database};
use kudos::telemetry::StderrJsonlTelemetrySink;
use kudos::{FeedbackError, KudosConfig};

/// Runs database migrations against the configured `SQLite` database.
///
/// # Errors
///
/// Returns [`FeedbackError::Configuration`] if the database URL is missing or
/// blank, and [`FeedbackError::Storage`] for connection or migration
/// failures.
pub fn run(config: &KudosConfig) -> Result<(), FeedbackError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| FeedbackError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;

    let telemetry = StderrJsonlTelemetrySink;
    let version = migrate_database(database_url, &telemetry)
        .map_err(|error| map_persistence_error(&error))?;
    tracing::info!(schema_version = version.as_str(), "database migrations applied");
    Ok(())
}

/// Maps a persistence error to a feedback error.
///
/// A blank URL is a configuration problem; connection and migration
/// failures are storage errors.
fn map_persistence_error(error: &PersistenceError) -> FeedbackError {
    if is_configuration_error(error) {
        FeedbackError::Configuration {
            message: error.to_string(),
        }
    } else {
        FeedbackError::Storage {
            message: error.to_string(),
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use kudos::persistence::PersistenceError;
    use kudos::{FeedbackError, KudosConfig};
    use rstest::rstest;
    use tempfile::TempDir;

    use super::{is_configuration_error, map_persistence_error, run};

    #[test]
    fn persistence_error_classification_distinguishes_missing_from_blank() {
        assert!(!is_configuration_error(&PersistenceError::MissingDatabaseUrl));
        assert!(is_configuration_error(&PersistenceError::BlankDatabaseUrl));
        assert!(matches!(
            map_persistence_error(&PersistenceError::BlankDatabaseUrl),
            FeedbackError::Configuration { .. }
        ));
        assert!(matches!(
            map_persistence_error(&PersistenceError::MigrationFailed {
                message: "boom".to_owned()
            }),
            FeedbackError::Storage { .. }
        ));
    }

    #[rstest]
    #[case::missing_database_url(None, "database URL is required")]
    #[case::blank_database_url(Some("   ".to_owned()), "database URL must not be blank")]
    fn migrate_db_rejects_invalid_database_url(
        #[case] database_url: Option<String>,
        #[case] expected_message_prefix: &str,
    ) {
        let config = KudosConfig {
            database_url,
            migrate_db: true,
            ..Default::default()
        };

        match run(&config) {
            Err(FeedbackError::Configuration { message }) => {
                assert!(
                    message.starts_with(expected_message_prefix),
                    "expected message starting with {expected_message_prefix:?}, got {message:?}"
                );
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn migrate_db_creates_the_schema() {
        let dir = TempDir::new().expect("temporary directory");
        let path = dir.path().join("kudos.sqlite");
        let config = KudosConfig {
            database_url: Some(path.to_string_lossy().into_owned()),
            migrate_db: true,
            ..Default::default()
        };

        run(&config).expect("migrations should apply");

        assert!(path.exists());
    }
}

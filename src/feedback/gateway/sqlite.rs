//! Gateway over the local `SQLite` feedback table.

use std::sync::Arc;

use async_trait::async_trait;

use super::FeedbackGateway;
use super::error_mapping::map_persistence_error;
use crate::feedback::error::FeedbackError;
use crate::feedback::models::{FeedbackEntry, NewFeedback, SortDirection};
use crate::persistence::{FeedbackStore, PersistenceError};

/// Feedback gateway that runs Diesel queries on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct SqliteFeedbackGateway {
    store: Arc<FeedbackStore>,
}

impl SqliteFeedbackGateway {
    /// Creates a gateway for the database at `database_url`.
    ///
    /// The schema is not checked until the first call; run migrations first.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::Configuration`] when the URL is blank.
    pub fn new(database_url: &str) -> Result<Self, FeedbackError> {
        let store = FeedbackStore::new(database_url)
            .map_err(|error| map_persistence_error("open feedback store", &error))?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    async fn run_blocking<T, F>(&self, operation: &str, work: F) -> Result<T, FeedbackError>
    where
        T: Send + 'static,
        F: FnOnce(&FeedbackStore) -> Result<T, PersistenceError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let outcome = tokio::task::spawn_blocking(move || work(&store))
            .await
            .map_err(|error| FeedbackError::Storage {
                message: format!("{operation}: blocking task failed: {error}"),
            })?;

        outcome.map_err(|error| {
            tracing::warn!("{operation} failed: {error}");
            map_persistence_error(operation, &error)
        })
    }
}

#[async_trait]
impl FeedbackGateway for SqliteFeedbackGateway {
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), FeedbackError> {
        let payload = feedback.clone();
        self.run_blocking("insert feedback", move |store| store.insert(&payload))
            .await
    }

    async fn select_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<FeedbackEntry>, FeedbackError> {
        self.run_blocking("list feedback", move |store| store.select_all(direction))
            .await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::SqliteFeedbackGateway;
    use crate::feedback::error::FeedbackError;
    use crate::feedback::gateway::FeedbackGateway;
    use crate::feedback::{FeedbackDraft, SortDirection};
    use crate::persistence::migrate_database;
    use crate::telemetry::NoopTelemetrySink;

    fn database_url(temp_dir: &TempDir) -> String {
        temp_dir
            .path()
            .join("kudos.sqlite")
            .to_string_lossy()
            .to_string()
    }

    #[tokio::test]
    async fn inserts_and_lists_through_blocking_pool() {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let url = database_url(&temp_dir);
        migrate_database(&url, &NoopTelemetrySink).expect("migration should succeed");
        let gateway = SqliteFeedbackGateway::new(&url).expect("gateway should build");
        let payload = FeedbackDraft {
            name: "Al".to_owned(),
            email: String::new(),
            rating: 5,
            comments: "Great".to_owned(),
        }
        .validate()
        .expect("draft should validate");

        gateway.insert(&payload).await.expect("insert should succeed");
        let entries = gateway
            .select_all(SortDirection::Descending)
            .await
            .expect("select should succeed");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(|entry| entry.name.as_str()), Some("Al"));
    }

    #[tokio::test]
    async fn missing_schema_maps_to_configuration_error() {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let gateway =
            SqliteFeedbackGateway::new(&database_url(&temp_dir)).expect("gateway should build");

        let result = gateway.select_all(SortDirection::Descending).await;

        match result {
            Err(FeedbackError::Configuration { message }) => {
                assert!(message.contains("--migrate-db"), "{message}");
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[rstest]
    fn blank_url_is_rejected() {
        assert!(matches!(
            SqliteFeedbackGateway::new(" "),
            Err(FeedbackError::Configuration { .. })
        ));
    }
}

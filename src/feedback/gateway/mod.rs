//! Gateways for persisting and reading feedback.
//!
//! The trait-based design keeps the views independent of the backend: the
//! REST implementation talks to a PostgREST/Supabase table, the `SQLite`
//! implementation uses the local database, and tests substitute an in-memory
//! fake or a `mockall` mock.

mod error_mapping;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod rest;
mod sqlite;

#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryFeedbackGateway;
pub use rest::{RestFeedbackGateway, RestGatewaySettings};
pub use sqlite::SqliteFeedbackGateway;

use async_trait::async_trait;

use super::error::FeedbackError;
use super::models::{FeedbackEntry, NewFeedback, SortDirection};

/// Gateway that can create and list feedback records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    /// Persist a validated feedback record.
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), FeedbackError>;

    /// Fetch every record ordered by `created_at` in `direction`.
    async fn select_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<FeedbackEntry>, FeedbackError>;
}

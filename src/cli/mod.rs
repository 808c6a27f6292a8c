//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`interactive`]: Terminal feedback form and review list
//! - [`listing`]: Print every collected response and exit
//! - [`migrations`]: Database schema migrations

use std::io;
use std::sync::Arc;

use kudos::{
    BackendSelection, FeedbackError, FeedbackGateway, KudosConfig, RestFeedbackGateway,
    SqliteFeedbackGateway,
};

pub mod interactive;
pub mod listing;
pub mod migrations;

/// Builds the gateway for the configured backend.
///
/// # Errors
///
/// Returns the configuration error raised while choosing or constructing
/// the backend.
pub fn connect_gateway(config: &KudosConfig) -> Result<Arc<dyn FeedbackGateway>, FeedbackError> {
    match config.backend()? {
        BackendSelection::Rest(settings) => {
            let gateway = RestFeedbackGateway::new(&settings)?;
            tracing::info!(table_url = %gateway.table_url(), "using hosted feedback table");
            Ok(Arc::new(gateway))
        }
        BackendSelection::Sqlite { database_url } => {
            tracing::info!(database_url, "using local feedback database");
            Ok(Arc::new(SqliteFeedbackGateway::new(&database_url)?))
        }
    }
}

/// Maps a stdout write failure to a feedback error.
pub fn io_error(error: &io::Error) -> FeedbackError {
    FeedbackError::Io {
        message: error.to_string(),
    }
}

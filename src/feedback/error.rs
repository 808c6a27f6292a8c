//! Error types exposed by the feedback layer.

use thiserror::Error;

/// Errors surfaced while configuring the application or talking to the
/// persistence backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedbackError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The backend URL could not be parsed.
    #[error("backend URL is invalid: {0}")]
    InvalidUrl(String),

    /// No API key was supplied for the REST backend.
    #[error("API key is required (use --api-key, KUDOS_API_KEY, or SUPABASE_ANON_KEY)")]
    MissingApiKey,

    /// The backend rejected the API key.
    #[error("backend rejected the API key: {message}")]
    Authentication {
        /// Error message returned with the 401/403 response.
        message: String,
    },

    /// The backend answered with a non-authentication failure.
    #[error("backend API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling the backend.
    #[error("network error talking to the backend: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The local `SQLite` store failed.
    #[error("local storage error: {message}")]
    Storage {
        /// Error detail from the persistence layer.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

//! Kudos library crate: a terminal feedback form and review listing.
//!
//! Feedback is validated locally, persisted through a [`FeedbackGateway`]
//! (a hosted PostgREST/Supabase table or a local `SQLite` database), and
//! listed newest first. The [`tui`] module hosts the interactive terminal
//! application.

pub mod config;
pub mod feedback;
pub mod logging;
pub mod persistence;
pub mod telemetry;
pub mod tui;

pub use config::{BackendSelection, KudosConfig, OperationMode};
pub use feedback::{
    FeedbackDraft, FeedbackEntry, FeedbackError, FeedbackGateway, FieldErrors, FormField,
    NewFeedback, Rating, RestFeedbackGateway, RestGatewaySettings, SortDirection,
    SqliteFeedbackGateway,
};

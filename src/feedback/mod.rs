//! Feedback domain: models, validation, and backend gateways.

pub mod error;
pub mod gateway;
pub mod models;
pub mod validation;

pub use error::FeedbackError;
#[cfg(any(test, feature = "test-support"))]
pub use gateway::InMemoryFeedbackGateway;
pub use gateway::{
    FeedbackGateway, RestFeedbackGateway, RestGatewaySettings, SqliteFeedbackGateway,
};
pub use models::{
    FeedbackEntry, FeedbackId, MAX_RATING, MIN_RATING, NewFeedback, Rating, RatingOutOfRange,
    SortDirection,
};
pub use validation::{FeedbackDraft, FieldErrors, FormField, is_valid_email};

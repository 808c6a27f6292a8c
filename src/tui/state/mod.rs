//! State management for the feedback terminal application.
//!
//! Each view owns a state struct with an explicit phase tag. Transitions are
//! plain methods so they can be tested without a terminal.

mod form;
mod listing;
mod notification;

pub use form::{FormPhase, RequestStatus, SubmissionFormState, SubmitRejection};
pub use listing::{ListingPhase, ReviewListState};
pub use notification::{NOTIFICATION_TTL, Notification, NotificationCenter, NotificationKind};

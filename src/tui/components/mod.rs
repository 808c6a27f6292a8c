//! UI components for the feedback terminal application.
//!
//! Components are stateless renderers: each takes a view context borrowed
//! from application state and returns the lines to draw.

mod feedback_form;
mod feedback_list;
mod rating;
mod text_wrap;

pub use feedback_form::{
    CONFIRMATION_TITLE, FORM_TITLE, FeedbackFormComponent, FeedbackFormViewContext,
};
pub use feedback_list::{
    EMPTY_SUBTITLE, EMPTY_TITLE, FeedbackListComponent, FeedbackListViewContext, LOADING_TEXT,
    format_count, format_entry, format_timestamp,
};
pub use rating::{RatingControl, RatingSize, RatingUnit};
pub use text_wrap::{wrap_indented, wrap_lines};

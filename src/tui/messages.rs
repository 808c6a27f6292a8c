//! Message types for the TUI update loop.
//!
//! Messages represent user actions, async command results, and system
//! events. Results of backend calls carry the mount generation of the view
//! that issued them so late replies for an unmounted view can be dropped.

use crate::feedback::FeedbackEntry;

/// Messages for the feedback terminal application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Form editing
    /// Move focus to the next field.
    FocusNext,
    /// Move focus to the previous field.
    FocusPrevious,
    /// Type a character into the focused field.
    InsertChar(char),
    /// Insert a line break into the comments field.
    InsertNewline,
    /// Delete the last character of the focused field.
    Backspace,
    /// Select a rating directly.
    SetRating(u8),
    /// Raise the rating by one star.
    RatingUp,
    /// Lower the rating by one star.
    RatingDown,
    /// Validate and submit the form.
    Submit,
    /// Discard the confirmation screen and start a blank form.
    NewResponse,

    // Backend results
    /// The insert issued by form mount `mount` succeeded.
    SubmitSucceeded {
        /// Mount generation of the issuing form.
        mount: u64,
    },
    /// The insert issued by form mount `mount` failed.
    SubmitFailed {
        /// Mount generation of the issuing form.
        mount: u64,
        /// Backend error description, for logging.
        message: String,
    },
    /// The read issued by list mount `mount` returned entries.
    ReviewsLoaded {
        /// Mount generation of the issuing list.
        mount: u64,
        /// Entries, newest first.
        entries: Vec<FeedbackEntry>,
    },
    /// The read issued by list mount `mount` failed.
    ReviewsFailed {
        /// Mount generation of the issuing list.
        mount: u64,
        /// Backend error description, for logging.
        message: String,
    },

    // Routing
    /// Mount the submission form.
    ShowSubmission,
    /// Mount the review list, which issues a fresh read.
    ShowReviews,

    // Review list scrolling
    /// Scroll up one line.
    ScrollUp,
    /// Scroll down one line.
    ScrollDown,
    /// Scroll up one page.
    PageUp,
    /// Scroll down one page.
    PageDown,
    /// Jump to the top.
    Home,
    /// Jump to the bottom.
    End,

    // Notifications
    /// Hide the visible notification.
    DismissNotification,
    /// Expiry timer for notification `id` fired.
    NotificationExpired {
        /// Sequence id of the notification the timer was armed for.
        id: u64,
    },

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for messages that edit or submit the form.
    #[must_use]
    pub const fn is_form(&self) -> bool {
        matches!(
            self,
            Self::FocusNext
                | Self::FocusPrevious
                | Self::InsertChar(_)
                | Self::InsertNewline
                | Self::Backspace
                | Self::SetRating(_)
                | Self::RatingUp
                | Self::RatingDown
                | Self::Submit
                | Self::NewResponse
        )
    }

    /// Returns true for backend results.
    #[must_use]
    pub const fn is_backend_result(&self) -> bool {
        matches!(
            self,
            Self::SubmitSucceeded { .. }
                | Self::SubmitFailed { .. }
                | Self::ReviewsLoaded { .. }
                | Self::ReviewsFailed { .. }
        )
    }

    /// Returns true for route changes.
    #[must_use]
    pub const fn is_routing(&self) -> bool {
        matches!(self, Self::ShowSubmission | Self::ShowReviews)
    }

    /// Returns true for review list scrolling.
    #[must_use]
    pub const fn is_scroll(&self) -> bool {
        matches!(
            self,
            Self::ScrollUp
                | Self::ScrollDown
                | Self::PageUp
                | Self::PageDown
                | Self::Home
                | Self::End
        )
    }

    /// Returns true for notification housekeeping.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(
            self,
            Self::DismissNotification | Self::NotificationExpired { .. }
        )
    }
}

//! Rendering logic for the feedback TUI application.
//!
//! These are pure query methods that read state without modification. The
//! frame is a header row, the route body, a notification row and a status
//! bar.

use chrono::Local;

use super::{FeedbackApp, Route};
use crate::tui::components::{
    FeedbackFormComponent, FeedbackFormViewContext, FeedbackListComponent,
    FeedbackListViewContext,
};
use crate::tui::input::InputContext;
use crate::tui::state::NotificationKind;

impl FeedbackApp {
    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = match self.route {
            Route::Submission => "Kudos - Feedback Form",
            Route::Reviews => "Kudos - All Feedback",
        };
        let indicator = if self.form.is_submitting() && self.route == Route::Submission {
            " [Submitting...]"
        } else if self.reviews.is_loading() && self.route == Route::Reviews {
            " [Loading...]"
        } else {
            ""
        };
        format!("{title}{indicator}\n")
    }

    /// Renders the mounted route, padded to the body height.
    pub(super) fn render_body(&self) -> String {
        let visible_height = self.body_height();
        let mut body = match self.route {
            Route::Submission => FeedbackFormComponent::view(&FeedbackFormViewContext {
                form: &self.form,
                max_width: self.content_width(),
                visible_height,
            }),
            Route::Reviews => FeedbackListComponent::view(&FeedbackListViewContext {
                phase: self.reviews.phase(),
                scroll_offset: self.reviews.scroll_offset,
                visible_height,
                max_width: self.content_width(),
                zone: &Local,
            }),
        };

        let rendered = body.lines().count();
        for _ in rendered..visible_height {
            body.push('\n');
        }
        body
    }

    /// Renders the notification row; blank when nothing is shown.
    pub(super) fn render_notification(&self) -> String {
        let Some(notification) = self.notifications.current() else {
            return "\n".to_owned();
        };
        let icon = match notification.kind {
            NotificationKind::Success => '✓',
            NotificationKind::Error => '✗',
        };
        format!(
            "{icon} {} - {} (Esc to dismiss)\n",
            notification.title, notification.description
        )
    }

    /// Renders the status bar with key hints for the current context.
    pub(super) fn render_status_bar(&self) -> String {
        let hints = match self.input_context() {
            InputContext::FormEditing(_) => {
                "Tab:next  Enter:submit  Ctrl-S:submit  Ctrl-L:view feedback  F1:help  Ctrl-C:quit"
            }
            InputContext::FormSubmitting => "Submitting...  Ctrl-C:quit",
            InputContext::FormSubmitted => "Enter:new response  v:view feedback  ?:help  q:quit",
            InputContext::ReviewList => "j/k:scroll  r:reload  b:back  ?:help  q:quit",
            InputContext::ReviewListEmpty => "n:submit feedback  b:back  ?:help  q:quit",
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay if visible.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Feedback form:
  Tab, Down      Next field
  Shift-Tab, Up  Previous field
  1-5            Select rating (rating field)
  Left, Right    Adjust rating (rating field)
  Enter          Submit (new line in comments)
  Ctrl-S         Submit
  Ctrl-L         View all feedback
  Esc            Dismiss notification

After submitting:
  Enter, n       Submit another response
  v              View all feedback

Feedback list:
  j, Down        Scroll down
  k, Up          Scroll up
  PgDn, PgUp     Scroll one page
  Home, g        Go to top
  End, G         Go to bottom
  r              Reload
  b, Esc         Back to the form (Esc dismisses a notification first)
  n, Enter       Open the form (empty list)

Other:
  F1, ?          Toggle this help
  q, Ctrl-C      Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}

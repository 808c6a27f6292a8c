//! Lifecycle, window and notification handlers.

use bubbletea_rs::Cmd;

use super::{FeedbackApp, Route};
use crate::tui::messages::AppMsg;

impl FeedbackApp {
    /// Dispatches lifecycle and window messages to their handlers.
    pub(super) fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => {
                // Unreachable: caller filters to lifecycle messages.
                None
            }
        }
    }

    /// Dispatches notification dismissal and expiry.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_notification_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::DismissNotification => {
                self.notifications.dismiss();
            }
            AppMsg::NotificationExpired { id } => {
                if !self.notifications.expire(*id) {
                    tracing::trace!(id, "expiry timer outlived its notification");
                }
            }
            _ => {
                // Unreachable: caller filters to notification messages.
            }
        }
        None
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        if self.route == Route::Reviews {
            let content = self.list_content_height();
            let visible = self.body_height();
            self.reviews.clamp_scroll(content, visible);
        }
        None
    }
}

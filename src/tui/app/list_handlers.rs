//! Review list handlers.
//!
//! Mounting the list issues one read ordered newest first. Scrolling is
//! bounded by the rendered height of the loaded entries.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;
use chrono::Local;

use super::form_handlers::ERROR_TITLE;
use super::{FeedbackApp, Route, missing_gateway};
use crate::feedback::{FeedbackEntry, SortDirection};
use crate::telemetry::{TelemetryEvent, elapsed_millis};
use crate::tui::components::FeedbackListComponent;
use crate::tui::messages::AppMsg;
use crate::tui::state::NotificationKind;

/// Description of the notification shown after a failed read.
pub(crate) const LOAD_FAILURE_DESCRIPTION: &str = "Failed to load feedback. Please try again.";

impl FeedbackApp {
    /// Creates the command that reads every entry, newest first.
    pub(super) fn load_reviews_cmd(&self) -> Cmd {
        let mount = self.mount_generation;
        let gateway = self.gateway.clone();
        let telemetry = Arc::clone(&self.telemetry);

        Box::pin(async move {
            let start = Instant::now();
            let result = match gateway {
                Some(gateway) => gateway.select_all(SortDirection::Descending).await,
                None => Err(missing_gateway()),
            };
            let msg = match result {
                Ok(entries) => {
                    telemetry.record(TelemetryEvent::FeedbackListLoaded {
                        entry_count: entries.len(),
                        latency_ms: elapsed_millis(start.elapsed()),
                    });
                    AppMsg::ReviewsLoaded { mount, entries }
                }
                Err(error) => AppMsg::ReviewsFailed {
                    mount,
                    message: error.to_string(),
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    /// Handles entries returned by a read.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_reviews_loaded(
        &mut self,
        mount: u64,
        entries: &[FeedbackEntry],
    ) -> Option<Cmd> {
        if !self.is_current_mount(Route::Reviews, mount) {
            tracing::debug!(mount, "dropping read result for an unmounted list");
            return None;
        }

        tracing::debug!(entry_count = entries.len(), "feedback list loaded");
        self.reviews.finish(entries.to_vec());
        None
    }

    /// Handles a failed read by showing an empty list and a notification.
    ///
    /// A stale mount leaves the list untouched but still reports the failure.
    pub(super) fn handle_reviews_failed(&mut self, mount: u64, message: &str) -> Option<Cmd> {
        tracing::warn!("loading feedback failed: {message}");
        if self.is_current_mount(Route::Reviews, mount) {
            self.reviews.fail();
        } else {
            tracing::debug!(mount, "read failed after its list was unmounted");
        }

        Some(self.notify(
            NotificationKind::Error,
            ERROR_TITLE,
            LOAD_FAILURE_DESCRIPTION,
        ))
    }

    /// Dispatches review list scrolling messages.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_scroll_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if self.route != Route::Reviews {
            return None;
        }

        let visible = self.body_height();
        let content = self.list_content_height();
        let page = visible.max(1);
        match msg {
            AppMsg::ScrollUp => self.reviews.scroll_up(1),
            AppMsg::ScrollDown => self.reviews.scroll_down(1, content, visible),
            AppMsg::PageUp => self.reviews.scroll_up(page),
            AppMsg::PageDown => self.reviews.scroll_down(page, content, visible),
            AppMsg::Home => self.reviews.scroll_to_top(),
            AppMsg::End => self.reviews.scroll_to_bottom(content, visible),
            _ => {
                // Unreachable: caller filters to scroll messages.
            }
        }
        None
    }

    /// Rendered height of the list body at the current width.
    pub(super) fn list_content_height(&self) -> usize {
        FeedbackListComponent::content_height(self.reviews.phase(), self.content_width(), &Local)
    }
}

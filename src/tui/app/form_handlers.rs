//! Submission form handlers.
//!
//! Editing messages mutate the form state directly. `Submit` validates the
//! draft and, when it passes, issues exactly one insert command; the result
//! comes back as `SubmitSucceeded` or `SubmitFailed` tagged with the form's
//! mount generation.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;

use super::{FeedbackApp, Route, missing_gateway};
use crate::feedback::NewFeedback;
use crate::telemetry::{TelemetryEvent, elapsed_millis};
use crate::tui::components::RatingControl;
use crate::tui::messages::AppMsg;
use crate::tui::state::{NotificationKind, SubmitRejection};

/// Title of the notification shown after a successful insert.
pub(crate) const SUBMIT_SUCCESS_TITLE: &str = "Thank you for your feedback!";
/// Description of the notification shown after a successful insert.
pub(crate) const SUBMIT_SUCCESS_DESCRIPTION: &str = "Your response has been recorded successfully.";
/// Title shared by every failure notification.
pub(crate) const ERROR_TITLE: &str = "Error";
/// Description of the notification shown after a failed insert.
pub(crate) const SUBMIT_FAILURE_DESCRIPTION: &str = "Failed to submit feedback. Please try again.";

impl FeedbackApp {
    /// Dispatches form editing and submission messages.
    pub(super) fn handle_form_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if self.route != Route::Submission {
            return None;
        }

        match msg {
            AppMsg::FocusNext => {
                self.form.focus_next();
                None
            }
            AppMsg::FocusPrevious => {
                self.form.focus_previous();
                None
            }
            AppMsg::InsertChar(character) => {
                self.form.insert_char(*character);
                None
            }
            AppMsg::InsertNewline => {
                self.form.insert_newline();
                None
            }
            AppMsg::Backspace => {
                self.form.backspace();
                None
            }
            AppMsg::SetRating(value) => self.handle_set_rating(*value),
            AppMsg::RatingUp => {
                self.form.increment_rating();
                None
            }
            AppMsg::RatingDown => {
                self.form.decrement_rating();
                None
            }
            AppMsg::Submit => self.handle_submit(),
            AppMsg::NewResponse => self.mount(Route::Submission),
            _ => {
                // Unreachable: caller filters to form messages.
                None
            }
        }
    }

    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_set_rating(&mut self, value: u8) -> Option<Cmd> {
        if !self.form.is_editable() {
            return None;
        }
        let control = RatingControl::interactive(self.form.draft().rating);
        if let Some(selected) = control.select(value) {
            self.form.set_rating(selected);
        }
        None
    }

    fn handle_submit(&mut self) -> Option<Cmd> {
        match self.form.begin_submit() {
            Ok(payload) => {
                tracing::debug!(mount = self.mount_generation, "submitting feedback");
                Some(self.insert_cmd(payload))
            }
            Err(SubmitRejection::Invalid(errors)) => {
                let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
                tracing::debug!(?fields, "submission blocked by validation");
                None
            }
            Err(rejection) => {
                tracing::debug!("submit ignored: {rejection}");
                None
            }
        }
    }

    /// Creates the command that performs one insert through the gateway.
    fn insert_cmd(&self, payload: NewFeedback) -> Cmd {
        let mount = self.mount_generation;
        let gateway = self.gateway.clone();
        let telemetry = Arc::clone(&self.telemetry);

        Box::pin(async move {
            let start = Instant::now();
            let result = match gateway {
                Some(gateway) => gateway.insert(&payload).await,
                None => Err(missing_gateway()),
            };
            let msg = match result {
                Ok(()) => {
                    telemetry.record(TelemetryEvent::FeedbackSubmitted {
                        latency_ms: elapsed_millis(start.elapsed()),
                    });
                    AppMsg::SubmitSucceeded { mount }
                }
                Err(error) => AppMsg::SubmitFailed {
                    mount,
                    message: error.to_string(),
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    /// Handles a completed insert.
    ///
    /// The notification is global and always shown; the form only moves to
    /// its confirmation screen when the issuing mount is still current.
    pub(super) fn handle_submit_succeeded(&mut self, mount: u64) -> Option<Cmd> {
        if self.is_current_mount(Route::Submission, mount) {
            self.form.complete_submit();
        } else {
            tracing::debug!(mount, "insert finished after its form was unmounted");
        }

        Some(self.notify(
            NotificationKind::Success,
            SUBMIT_SUCCESS_TITLE,
            SUBMIT_SUCCESS_DESCRIPTION,
        ))
    }

    /// Handles a failed insert; the draft is kept for a manual retry.
    pub(super) fn handle_submit_failed(&mut self, mount: u64, message: &str) -> Option<Cmd> {
        tracing::warn!("feedback submission failed: {message}");
        if self.is_current_mount(Route::Submission, mount) {
            self.form.fail_submit();
        } else {
            tracing::debug!(mount, "insert failed after its form was unmounted");
        }

        Some(self.notify(
            NotificationKind::Error,
            ERROR_TITLE,
            SUBMIT_FAILURE_DESCRIPTION,
        ))
    }
}

//! Message routing and route mounting.
//!
//! Messages are dispatched by category. Mounting a route bumps the mount
//! generation, so results still in flight for the previous view are
//! recognised as stale and dropped.

use bubbletea_rs::Cmd;

use super::{FeedbackApp, Route};
use crate::tui::messages::AppMsg;

impl FeedbackApp {
    /// Handles a message and updates state accordingly.
    ///
    /// This method is the core update function that processes all
    /// application messages and returns any resulting command.
    #[doc(hidden)]
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_form() {
            return self.handle_form_msg(msg);
        }
        if msg.is_backend_result() {
            return self.handle_backend_result(msg);
        }
        if msg.is_routing() {
            return self.handle_routing_msg(msg);
        }
        if msg.is_scroll() {
            return self.handle_scroll_msg(msg);
        }
        if msg.is_notification() {
            return self.handle_notification_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches results of backend commands.
    fn handle_backend_result(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::SubmitSucceeded { mount } => self.handle_submit_succeeded(*mount),
            AppMsg::SubmitFailed { mount, message } => self.handle_submit_failed(*mount, message),
            AppMsg::ReviewsLoaded { mount, entries } => self.handle_reviews_loaded(*mount, entries),
            AppMsg::ReviewsFailed { mount, message } => {
                self.handle_reviews_failed(*mount, message)
            }
            _ => {
                // Unreachable: caller filters to backend results.
                None
            }
        }
    }

    fn handle_routing_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ShowSubmission => self.mount(Route::Submission),
            AppMsg::ShowReviews => self.mount(Route::Reviews),
            _ => {
                // Unreachable: caller filters to routing messages.
                None
            }
        }
    }

    /// Mounts `route` with fresh state.
    ///
    /// The form mounts blank; the list mounts in `Loading` and issues a
    /// read. Remounting the current route behaves the same way.
    pub(super) fn mount(&mut self, route: Route) -> Option<Cmd> {
        self.mount_generation = self.mount_generation.wrapping_add(1);
        self.route = route;
        tracing::debug!(?route, mount = self.mount_generation, "mounting route");

        match route {
            Route::Submission => {
                self.form.reset();
                None
            }
            Route::Reviews => {
                self.reviews.begin_loading();
                Some(self.load_reviews_cmd())
            }
        }
    }
}

//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the core application state for the feedback
//! terminal. The application has two routes: the submission form and the
//! review list. Backend calls run as async commands and report back through
//! messages tagged with the mount generation of the view that issued them.
//!
//! # Module Structure
//!
//! - `form_handlers`: Form editing, submission and insert results
//! - `list_handlers`: Review loading, read results and scrolling
//! - `lifecycle_handlers`: Quit, help, resize and notifications
//! - `routing`: Message dispatch and route mounting
//! - `model_impl`: `bubbletea_rs::Model` implementation
//! - `rendering`: Header, notification line, status bar and help overlay

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::state::{NotificationCenter, NotificationKind, ReviewListState, SubmissionFormState};
use crate::feedback::{FeedbackError, FeedbackGateway};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

mod form_handlers;
mod lifecycle_handlers;
mod list_handlers;
mod model_impl;
mod rendering;
mod routing;

/// Rows used by the header, notification line and status bar.
const CHROME_HEIGHT: usize = 3;

/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// The feedback submission form.
    #[default]
    Submission,
    /// The list of collected feedback.
    Reviews,
}

/// Main application model for the feedback terminal.
pub struct FeedbackApp {
    gateway: Option<Arc<dyn FeedbackGateway>>,
    telemetry: Arc<dyn TelemetrySink>,
    /// Route currently mounted.
    pub(crate) route: Route,
    /// Incremented on every mount so late results can be recognised.
    mount_generation: u64,
    /// Submission form state.
    pub(crate) form: SubmissionFormState,
    /// Review list state.
    pub(crate) reviews: ReviewListState,
    /// Visible notification.
    pub(crate) notifications: NotificationCenter,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
}

impl fmt::Debug for FeedbackApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackApp")
            .field("has_gateway", &self.gateway.is_some())
            .field("route", &self.route)
            .field("mount_generation", &self.mount_generation)
            .field("form", &self.form)
            .field("reviews", &self.reviews)
            .field("notifications", &self.notifications)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("show_help", &self.show_help)
            .finish_non_exhaustive()
    }
}

impl Default for FeedbackApp {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackApp {
    /// Creates an application showing a blank submission form.
    ///
    /// No gateway is attached; backend calls fail until one is supplied via
    /// [`FeedbackApp::with_gateway`].
    #[must_use]
    pub fn new() -> Self {
        let (width, height) = crate::tui::storage::get_initial_terminal_size();
        Self {
            gateway: None,
            telemetry: Arc::new(NoopTelemetrySink),
            route: Route::Submission,
            mount_generation: 1,
            form: SubmissionFormState::new(),
            reviews: ReviewListState::new(),
            notifications: NotificationCenter::new(),
            width,
            height,
            show_help: false,
        }
    }

    /// Attaches the gateway used for inserts and reads.
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn FeedbackGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Attaches the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Route currently mounted.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Mount generation of the current route.
    #[must_use]
    pub const fn mount_generation(&self) -> u64 {
        self.mount_generation
    }

    /// Submission form state.
    #[must_use]
    pub const fn form(&self) -> &SubmissionFormState {
        &self.form
    }

    /// Review list state.
    #[must_use]
    pub const fn reviews(&self) -> &ReviewListState {
        &self.reviews
    }

    /// Notification centre.
    #[must_use]
    pub const fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Whether the help overlay is visible.
    #[must_use]
    pub const fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Whether a result tagged with `mount` belongs to the mounted `route`.
    fn is_current_mount(&self, route: Route, mount: u64) -> bool {
        self.route == route && self.mount_generation == mount
    }

    /// Shows a notification and arms its expiry timer.
    fn notify(&mut self, kind: NotificationKind, title: &str, description: &str) -> Cmd {
        let id = self.notifications.show(kind, title, description);
        Box::pin(async move {
            tokio::time::sleep(crate::tui::state::NOTIFICATION_TTL).await;
            Some(Box::new(crate::tui::messages::AppMsg::NotificationExpired { id })
                as Box<dyn Any + Send>)
        })
    }

    /// Body rows left once the chrome is drawn.
    const fn body_height(&self) -> usize {
        (self.height as usize).saturating_sub(CHROME_HEIGHT)
    }

    /// Columns usable by components; the last column is kept free.
    const fn content_width(&self) -> usize {
        let width = self.width as usize;
        if width > 1 { width - 1 } else { 1 }
    }
}

/// Error returned by commands issued without an attached gateway.
fn missing_gateway() -> FeedbackError {
    FeedbackError::Configuration {
        message: "no feedback backend configured".to_owned(),
    }
}

//! Startup context storage for the feedback TUI.
//!
//! This module owns the global `OnceLock` values read while the TUI
//! bootstraps and provides the setter/getter functions consumed by CLI
//! wiring and `FeedbackApp::init()`.

use std::sync::{Arc, OnceLock};

use crossterm::terminal;

use crate::feedback::FeedbackGateway;
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

/// Global storage for the persistence gateway.
///
/// This is set before the TUI program starts and read by
/// `FeedbackApp::init()`.
static GATEWAY: OnceLock<Arc<dyn FeedbackGateway>> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts so the first frame uses the
/// actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for the telemetry sink.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Sets the gateway used for inserts and reads.
///
/// This must be called before starting the bubbletea-rs program. Without a
/// gateway every backend call fails with an error notification.
///
/// # Returns
///
/// `true` if the gateway was set, `false` if it was already set.
pub fn set_gateway(gateway: Arc<dyn FeedbackGateway>) -> bool {
    GATEWAY.set(gateway).is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets the configured gateway, if any.
pub(crate) fn get_gateway() -> Option<Arc<dyn FeedbackGateway>> {
    GATEWAY.get().cloned()
}

/// Gets the telemetry sink, returning a no-op sink if not configured.
pub(crate) fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Gets the initial terminal dimensions from storage.
///
/// Falls back to querying the terminal, then to 80x24.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

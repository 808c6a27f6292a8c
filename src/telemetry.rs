//! Application telemetry events and sinks.
//!
//! Kudos keeps telemetry local: events are dropped, written to stderr as
//! JSON lines, or forwarded to the tracing subscriber for debugging. They
//! capture operational signals such as the active database schema version
//! and backend round-trip latency.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Kudos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20261001000000`).
        schema_version: String,
    },
    /// A feedback record was accepted by the backend.
    FeedbackSubmitted {
        /// Round-trip time of the insert call in milliseconds.
        latency_ms: u64,
    },
    /// The review list finished loading.
    FeedbackListLoaded {
        /// Number of entries returned.
        entry_count: usize,
        /// Round-trip time of the read call in milliseconds.
        latency_ms: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

/// Forwards telemetry events to `tracing` as JSON payloads.
///
/// Used while the terminal application owns the screen, so events end up in
/// the log file instead of corrupting the display.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        match serde_json::to_string(&event) {
            Ok(serialised) => tracing::info!(target: "kudos::telemetry", "{serialised}"),
            Err(error) => tracing::debug!("dropping unserialisable telemetry event: {error}"),
        }
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Converts an elapsed duration to whole milliseconds, saturating.
#[must_use]
pub fn elapsed_millis(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Recording sink for asserting on emitted telemetry.

    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

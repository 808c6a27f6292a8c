//! Headless listing of collected feedback.
//!
//! Entries are fetched newest first and printed with the same formatter the
//! review list uses, without wrapping.

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Instant;

use chrono::{Local, TimeZone};
use kudos::telemetry::{StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink, elapsed_millis};
use kudos::tui::components::{EMPTY_SUBTITLE, EMPTY_TITLE, format_count, format_entry};
use kudos::{FeedbackEntry, FeedbackError, KudosConfig, SortDirection};

use super::{connect_gateway, io_error};

/// Fetches every entry and prints it to stdout.
///
/// # Errors
///
/// Returns the backend error when the read fails, or
/// [`FeedbackError::Io`] when stdout cannot be written.
pub async fn run(config: &KudosConfig) -> Result<(), FeedbackError> {
    let gateway = connect_gateway(config)?;
    let telemetry = StderrJsonlTelemetrySink;

    let start = Instant::now();
    let entries = gateway.select_all(SortDirection::Descending).await?;
    telemetry.record(TelemetryEvent::FeedbackListLoaded {
        entry_count: entries.len(),
        latency_ms: elapsed_millis(start.elapsed()),
    });

    let mut stdout = io::stdout().lock();
    write_listing(&mut stdout, &entries, &Local)
}

/// Writes the count line followed by each entry, or the empty state.
pub fn write_listing<W, Tz>(
    writer: &mut W,
    entries: &[FeedbackEntry],
    zone: &Tz,
) -> Result<(), FeedbackError>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if entries.is_empty() {
        writeln!(writer, "{EMPTY_TITLE}").map_err(|e| io_error(&e))?;
        writeln!(writer, "{EMPTY_SUBTITLE}").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    writeln!(writer, "{}", format_count(entries.len())).map_err(|e| io_error(&e))?;
    for entry in entries {
        writeln!(writer).map_err(|e| io_error(&e))?;
        for line in format_entry(entry, zone, 0) {
            writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}

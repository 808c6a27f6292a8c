//! Interactive terminal mode.
//!
//! Hands the gateway and telemetry sink to the TUI through its startup
//! storage, then runs the bubbletea-rs program on the alternate screen.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use kudos::telemetry::TracingTelemetrySink;
use kudos::tui::{FeedbackApp, set_gateway, set_initial_terminal_size, set_telemetry_sink};
use kudos::{FeedbackError, KudosConfig};

use super::connect_gateway;

/// Runs the feedback form and review list until the user quits.
///
/// # Errors
///
/// Returns the configuration error when no backend can be built, or
/// [`FeedbackError::Io`] when the terminal program fails.
pub async fn run(config: &KudosConfig) -> Result<(), FeedbackError> {
    let gateway = connect_gateway(config)?;

    // Storage is write-once; a second run in the same process keeps the
    // first context.
    if !set_gateway(gateway) {
        tracing::debug!("gateway already configured; keeping the existing one");
    }
    if !set_telemetry_sink(Arc::new(TracingTelemetrySink)) {
        tracing::debug!("telemetry sink already configured");
    }
    if let Ok((width, height)) = crossterm::terminal::size()
        && !set_initial_terminal_size(width, height)
    {
        tracing::debug!("initial terminal size already recorded");
    }

    run_tui().await.map_err(|error| FeedbackError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `FeedbackApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // FeedbackApp::init() retrieves its context from module-level storage.
    let program = Program::<FeedbackApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}

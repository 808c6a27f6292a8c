//! Terminal User Interface for submitting and reviewing feedback.
//!
//! This module provides an interactive TUI built on the bubbletea-rs
//! framework with two routes: a validated submission form and a list of
//! collected feedback.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::FeedbackApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Form, list and notification state machines
//! - [`components`]: Stateless renderers
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Startup Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the gateway and telemetry sink are handed over through
//! module-level storage. Call [`set_gateway`] before starting the program,
//! and `FeedbackApp::init()` will pick it up.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;

pub use app::{FeedbackApp, Route};
pub use storage::{set_gateway, set_initial_terminal_size, set_telemetry_sink};

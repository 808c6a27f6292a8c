//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence and CLI/environment loading
//! - `operation_mode`: Operation mode determination
//! - `backend_selection`: Backend choice and API key resolution

mod helpers;

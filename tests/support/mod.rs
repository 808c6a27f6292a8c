//! Shared test utilities.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Environment variables read by the binary; cleared so tests are hermetic.
const KUDOS_ENV: [&str; 7] = [
    "KUDOS_BACKEND_URL",
    "KUDOS_API_KEY",
    "KUDOS_TABLE",
    "KUDOS_DATABASE_URL",
    "KUDOS_LOG_FILE",
    "KUDOS_LOG",
    "SUPABASE_ANON_KEY",
];

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Returns the path to the built `kudos` binary.
///
/// # Panics
///
/// Panics if the test executable path cannot be determined.
pub fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop(); // test binary
    path.pop(); // deps
    path.push("kudos");
    path
}

/// Runs the binary with `args`, a clean environment and a scratch working
/// directory, so no `.kudos.toml` is discovered.
///
/// # Panics
///
/// Panics if the binary cannot be spawned.
pub fn run_kudos(args: &[&str], env: &[(&str, &str)]) -> Output {
    let scratch = create_temp_dir();
    let mut command = Command::new(binary_path());
    command
        .args(args)
        .current_dir(scratch.path())
        .env("HOME", scratch.path())
        .env("XDG_CONFIG_HOME", scratch.path());

    for key in KUDOS_ENV {
        command.env_remove(key);
    }
    for (key, value) in env {
        command.env(key, value);
    }

    command
        .output()
        .unwrap_or_else(|error| panic!("failed to execute binary: {error}"))
}

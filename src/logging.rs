//! Log setup.
//!
//! Filters come from `ALFRED_LOG` (same syntax as `RUST_LOG`). Without it,
//! only warnings are shown, or info and above with `--verbose`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AlfredError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ALFRED_LOG";

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "alfred=info" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr.
pub fn init_stderr(verbose: bool) {
    // A subscriber may already be set (tests); keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Log to `path`, appending. Used while the terminal menu owns the screen.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_file(path: &Path, verbose: bool) -> Result<(), AlfredError> {
    let file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
        AlfredError::Config(format!("Failed to open log file {}: {e}", path.display()))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok();
    Ok(())
}

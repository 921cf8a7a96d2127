//! Installation check for the focus-mode shortcut.
//!
//! Newer macOS releases only expose Focus through Shortcuts, so the utility
//! depends on a packaged shortcut being present in the user's library.

use std::path::Path;

use crate::error::AlfredError;
use crate::system::command::{CommandRunner, ExternalCommand};

/// Check whether `name` appears in `shortcuts list`.
///
/// # Errors
///
/// Returns `AlfredError::ExternalTool` if `shortcuts` cannot be run.
pub fn is_installed<R: CommandRunner + ?Sized>(
    runner: &R,
    name: &str,
) -> Result<bool, AlfredError> {
    let output = runner.run(&ExternalCommand::new("shortcuts").arg("list"))?;
    Ok(output.stdout.lines().any(|line| line.trim() == name))
}

/// Open the packaged `.shortcut` file so Shortcuts offers to import it.
///
/// # Errors
///
/// Returns `AlfredError::Config` if the file does not exist, or
/// `AlfredError::ExternalTool` if `open` fails.
pub fn install<R: CommandRunner + ?Sized>(runner: &R, file: &Path) -> Result<(), AlfredError> {
    if !file.exists() {
        return Err(AlfredError::Config(format!(
            "Shortcut file not found: {}",
            file.display()
        )));
    }

    runner
        .run(&ExternalCommand::new("open").arg(file.display().to_string()))
        .map(|_| ())
}

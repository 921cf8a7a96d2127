//! Dock auto-hide through System Events.

use crate::error::AlfredError;
use crate::system::command::{CommandRunner, ExternalCommand};

// osascript rather than `killall Dock`: restarting the Dock brings every
// minimised window back.
const TOGGLE_AUTOHIDE: &str = "tell application \"System Events\" to set autohide of \
     dock preferences to not (autohide of dock preferences)";

/// Flips the Dock's auto-hide preference.
#[derive(Debug, Clone)]
pub struct DockToggle<R> {
    runner: R,
}

impl<R: CommandRunner> DockToggle<R> {
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    #[must_use]
    pub fn command() -> ExternalCommand {
        ExternalCommand::new("osascript").arg("-e").arg(TOGGLE_AUTOHIDE)
    }

    /// Toggle auto-hide.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::ExternalTool` if osascript fails.
    pub fn toggle(&self) -> Result<(), AlfredError> {
        self.runner.run(&Self::command()).map(|_| ())
    }
}

//! Error types for alfred.

use thiserror::Error;

/// Errors raised by focus sessions, the system adapters and the CLI.
#[derive(Error, Debug)]
pub enum AlfredError {
    /// A start was requested while a focus session is active.
    #[error("A focus session is already running")]
    AlreadyRunning,

    /// A stop or terminate was requested with nothing to stop.
    #[error("Focus does not appear to be running")]
    NotRunning,

    /// Non-positive or non-numeric duration input.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A Pomodoro run was begun without a configured plan.
    #[error("No Pomodoro plan configured")]
    NotConfigured,

    /// The do-not-disturb shortcut or the Dock script failed.
    #[error("{tool} failed: {message}")]
    ExternalTool {
        /// Program that was invoked.
        tool: String,
        /// What went wrong.
        message: String,
    },

    /// The focus-mode shortcut is not installed in the Shortcuts app.
    #[error("Focus shortcut '{0}' is not installed. Run 'alfred shortcut install' first.")]
    ShortcutNotInstalled(String),

    /// Configuration could not be read, parsed or applied.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AlfredError {
    /// Build an external tool failure.
    pub fn external(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Map the stderr of a failed external command to an error.
    #[must_use]
    pub fn from_stderr(tool: &str, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        if trimmed.is_empty() {
            Self::external(tool, "exited with a non-zero status")
        } else {
            Self::external(tool, trimmed)
        }
    }

    /// Whether the caller can carry on after this error.
    ///
    /// External tool failures leave the in-process session intact; the
    /// rest stop the operation that raised them.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ExternalTool { .. }
                | Self::AlreadyRunning
                | Self::NotRunning
                | Self::InvalidDuration(_)
        )
    }
}

//! Do Not Disturb through the focus-mode shortcut.
//!
//! The shortcut reads an `on <minutes>` or `off` line from stdin and flips the
//! system focus mode. Nothing it prints is interpreted.

use crate::error::AlfredError;
use crate::focus::FocusState;
use crate::system::command::{CommandRunner, ExternalCommand};

/// Sends on/off requests to the focus-mode shortcut.
#[derive(Debug, Clone)]
pub struct DndToggle<R> {
    runner: R,
    shortcut_name: String,
}

impl<R: CommandRunner> DndToggle<R> {
    pub fn new(runner: R, shortcut_name: impl Into<String>) -> Self {
        Self {
            runner,
            shortcut_name: shortcut_name.into(),
        }
    }

    /// Build the shortcut invocation for a request.
    #[must_use]
    pub fn command(&self, state: FocusState, minutes: u32) -> ExternalCommand {
        let input = match state {
            FocusState::On => format!("on {minutes}\n"),
            FocusState::Off => "off\n".to_string(),
        };
        ExternalCommand::new("shortcuts")
            .arg("run")
            .arg(&self.shortcut_name)
            .stdin(input)
    }

    /// Request Do Not Disturb on (for `minutes`) or off.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::ExternalTool` if the shortcut fails to run.
    pub fn set(&self, state: FocusState, minutes: u32) -> Result<(), AlfredError> {
        self.runner.run(&self.command(state, minutes)).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::command::{CommandOutput, MockCommandRunner};

    #[test]
    fn test_on_command() {
        let dnd = DndToggle::new(MockCommandRunner::new(), "alfred-focus-mode");
        let cmd = dnd.command(FocusState::On, 25);

        assert_eq!(cmd.program, "shortcuts");
        assert_eq!(cmd.args, vec!["run", "alfred-focus-mode"]);
        assert_eq!(cmd.stdin.as_deref(), Some("on 25\n"));
    }

    #[test]
    fn test_off_ignores_minutes() {
        let dnd = DndToggle::new(MockCommandRunner::new(), "macos-focus-mode");
        let cmd = dnd.command(FocusState::Off, 30);

        assert_eq!(cmd.args, vec!["run", "macos-focus-mode"]);
        assert_eq!(cmd.stdin.as_deref(), Some("off\n"));
    }

    #[test]
    fn test_set_runs_shortcut_once() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd| {
                cmd.program == "shortcuts" && cmd.stdin.as_deref() == Some("on 5\n")
            })
            .times(1)
            .returning(|_| Ok(CommandOutput::default()));

        let dnd = DndToggle::new(runner, "alfred-focus-mode");
        dnd.set(FocusState::On, 5).unwrap();
    }

    #[test]
    fn test_set_propagates_failure() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| {
                Err(AlfredError::external(
                    "shortcuts",
                    "The shortcut could not be found",
                ))
            });

        let dnd = DndToggle::new(runner, "alfred-focus-mode");
        let err = dnd.set(FocusState::Off, 0).unwrap_err();
        assert!(err.to_string().contains("could not be found"));
    }
}

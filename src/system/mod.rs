//! Adapters for the macOS tools a focus session drives.
//!
//! Every request is a fire-and-forget shell invocation: `shortcuts` for
//! Do Not Disturb and `osascript` for the Dock. Only the exit status is
//! observed.

pub mod command;
mod dnd;
mod dock;
pub mod shortcut;

pub use command::{CommandOutput, CommandRunner, ExternalCommand, ShellRunner};
pub use dnd::DndToggle;
pub use dock::DockToggle;

use crate::error::AlfredError;
use crate::focus::FocusState;

/// The system side of a focus session.
#[cfg_attr(test, mockall::automock)]
pub trait FocusBackend {
    /// Request Do Not Disturb on for `minutes`, or off.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::ExternalTool` if the request could not be sent.
    fn set_dnd(&self, state: FocusState, minutes: u32) -> Result<(), AlfredError>;

    /// Flip Dock auto-hide.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::ExternalTool` if the request could not be sent.
    fn toggle_dock(&self) -> Result<(), AlfredError>;
}

/// The real backend: the focus shortcut plus System Events.
#[derive(Debug, Clone)]
pub struct MacSystem<R = ShellRunner> {
    dnd: DndToggle<R>,
    dock: DockToggle<R>,
}

impl<R: CommandRunner + Clone> MacSystem<R> {
    pub fn new(runner: R, shortcut_name: impl Into<String>) -> Self {
        Self {
            dnd: DndToggle::new(runner.clone(), shortcut_name),
            dock: DockToggle::new(runner),
        }
    }
}

impl<R: CommandRunner> FocusBackend for MacSystem<R> {
    fn set_dnd(&self, state: FocusState, minutes: u32) -> Result<(), AlfredError> {
        self.dnd.set(state, minutes)
    }

    fn toggle_dock(&self) -> Result<(), AlfredError> {
        self.dock.toggle()
    }
}

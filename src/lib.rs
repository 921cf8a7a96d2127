//! alfred - timed focus sessions for macOS
//!
//! Turns on Do Not Disturb through a Shortcuts automation, toggles Dock
//! auto-hide and counts down, then puts both back. Sessions can run once,
//! as Pomodoro cycles, from an interactive menu or in the background.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod focus;
pub mod logging;
pub mod menu;
pub mod output;
pub mod system;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::AlfredError;
pub use focus::{PomodoroController, SessionController};

//! Configuration management for alfred.
//!
//! This module handles loading configuration from `~/.alfred/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, LegacyConfig, MenuConfig, PomodoroConfig, ShortcutConfig};

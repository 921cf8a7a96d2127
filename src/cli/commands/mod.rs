//! Command implementations for alfred.
//!
//! Each handler returns the text to print; `main` prints it.

mod completions;
mod config;
mod focus;
mod legacy;
mod shortcut;

pub use completions::completions;
pub use config::config;
pub use focus::{menu, pomodoro, start};
pub use legacy::{daemon, disable, enable, status};
pub use shortcut::shortcut;

use std::path::PathBuf;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::AlfredError;
use crate::system::{MacSystem, ShellRunner};

/// Loaded configuration plus the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
}

impl Context {
    /// Load the config from `config_path`, or from `~/.alfred/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid, or if no path is
    /// given and the home directory is unknown.
    pub fn load(config_path: Option<PathBuf>, format: OutputFormat) -> Result<Self, AlfredError> {
        let config_path = match config_path {
            Some(path) => path,
            None => Paths::new()?.config_file,
        };
        let config = Config::load_from_path(&config_path)?;
        Ok(Self {
            config,
            config_path,
            format,
        })
    }

    #[must_use]
    pub fn runner(&self) -> ShellRunner {
        ShellRunner::new(self.config.shortcut.timeout())
    }

    #[must_use]
    pub fn system(&self) -> MacSystem {
        MacSystem::new(self.runner(), &self.config.shortcut.name)
    }

    /// The flag value, else the configured PID file.
    #[must_use]
    pub fn pid_file(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.config.legacy.pid_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "shortcut:\n  name: my-focus\n").unwrap();

        let ctx = Context::load(Some(path.clone()), OutputFormat::Json).unwrap();
        assert_eq!(ctx.config.shortcut.name, "my-focus");
        assert_eq!(ctx.config_path, path);
        assert_eq!(ctx.pid_file(None), PathBuf::from("/tmp/alfred_focus.pid"));
        assert_eq!(ctx.pid_file(Some(dir.path().join("a.pid"))), dir.path().join("a.pid"));
    }
}

//! Path resolution for alfred configuration and log files.
//!
//! All alfred data is stored in `~/.alfred/`:
//! - `config.yaml` - Main configuration file
//! - `alfred.log` - Log output while the terminal menu is open

use std::path::PathBuf;

use crate::error::AlfredError;

/// Paths to alfred configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.alfred/`
    pub root: PathBuf,
    /// Config file: `~/.alfred/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.alfred/alfred.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AlfredError> {
        let home = std::env::var("HOME")
            .map_err(|_| AlfredError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".alfred")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("alfred.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), AlfredError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                AlfredError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

//! Configuration settings for alfred.
//!
//! Settings are loaded from `~/.alfred/config.yaml` unless `--config`
//! names another file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AlfredError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Focus-mode shortcut settings.
    pub shortcut: ShortcutConfig,
    /// Menu settings.
    pub menu: MenuConfig,
    /// Pomodoro defaults.
    pub pomodoro: PomodoroConfig,
    /// Background variant settings.
    pub legacy: LegacyConfig,
}

/// Focus-mode shortcut settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Name of the shortcut in the Shortcuts app.
    #[serde(default = "default_shortcut_name")]
    pub name: String,
    /// Packaged `.shortcut` file opened by `alfred shortcut install`.
    #[serde(default = "default_shortcut_file")]
    pub file: PathBuf,
    /// Seconds to wait for `shortcuts` or `osascript` before giving up.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Menu settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    /// Focus lengths offered in the menu, in minutes.
    #[serde(default = "default_focus_lengths")]
    pub focus_lengths: Vec<u32>,
}

/// Pomodoro defaults, used when prompts are skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PomodoroConfig {
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    #[serde(default = "default_total_sessions")]
    pub total_sessions: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Background variant settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LegacyConfig {
    /// Where `enable` records the worker pid.
    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,
}

// Default value functions for serde
fn default_shortcut_name() -> String {
    "alfred-focus-mode".to_string()
}

fn default_shortcut_file() -> PathBuf {
    PathBuf::from("assets/alfred-focus-mode.shortcut")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_focus_lengths() -> Vec<u32> {
    vec![1, 5, 10, 15, 30, 45, 60, 90]
}

const fn default_session_minutes() -> u32 {
    25
}

const fn default_total_sessions() -> u32 {
    4
}

const fn default_break_minutes() -> u32 {
    5
}

fn default_pid_file() -> PathBuf {
    PathBuf::from("/tmp/alfred_focus.pid")
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            name: default_shortcut_name(),
            file: default_shortcut_file(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            focus_lengths: default_focus_lengths(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            total_sessions: default_total_sessions(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            pid_file: default_pid_file(),
        }
    }
}

impl ShortcutConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid values.
    pub fn load_from_path(path: &Path) -> Result<Self, AlfredError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AlfredError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            AlfredError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, AlfredError> {
        serde_yaml::to_string(self)
            .map_err(|e| AlfredError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Reject values the controllers cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::Config` naming the first bad value.
    pub fn validate(&self) -> Result<(), AlfredError> {
        if self.shortcut.name.trim().is_empty() {
            return Err(AlfredError::Config("shortcut.name must not be empty".to_string()));
        }
        if self.shortcut.timeout_secs == 0 {
            return Err(AlfredError::Config(
                "shortcut.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.menu.focus_lengths.is_empty() {
            return Err(AlfredError::Config(
                "menu.focus_lengths must list at least one length".to_string(),
            ));
        }
        if self.menu.focus_lengths.contains(&0) {
            return Err(AlfredError::Config(
                "menu.focus_lengths must be greater than 0".to_string(),
            ));
        }
        let p = &self.pomodoro;
        if p.session_minutes == 0 || p.total_sessions == 0 || p.break_minutes == 0 {
            return Err(AlfredError::Config(
                "pomodoro values must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.shortcut.name, "alfred-focus-mode");
        assert_eq!(config.shortcut.timeout(), Duration::from_secs(10));
        assert_eq!(config.menu.focus_lengths, vec![1, 5, 10, 15, 30, 45, 60, 90]);
        assert_eq!(config.pomodoro.session_minutes, 25);
        assert_eq!(config.pomodoro.break_minutes, 5);
        assert_eq!(config.legacy.pid_file, PathBuf::from("/tmp/alfred_focus.pid"));
        config.validate().unwrap();
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rendered_config_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.shortcut.name = "macos-focus-mode".to_string();
        config.menu.focus_lengths = vec![20, 25, 50];

        std::fs::write(&config_path, config.to_yaml().unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.shortcut.name, "macos-focus-mode");
        assert_eq!(loaded.menu.focus_lengths, vec![20, 25, 50]);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
pomodoro:
  session_minutes: 50
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.pomodoro.session_minutes, 50);
        assert_eq!(config.pomodoro.break_minutes, 5);
        assert_eq!(config.shortcut.name, "alfred-focus-mode");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "menu:\n  focus_lengths: [5, 0]\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(AlfredError::Config(_))
        ));

        std::fs::write(&config_path, "menu:\n  focus_lengths: []\n").unwrap();
        assert!(Config::load_from_path(&config_path).is_err());
    }

    #[test]
    fn test_unparsable_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "shortcut: [not, a, map").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

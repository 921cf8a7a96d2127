//! Background focus: `enable`, `disable`, `status` and the hidden worker.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::AlfredError;
use crate::focus::{LegacyFocus, PidFile};
use crate::output::to_json;

#[derive(Debug, Serialize)]
struct BackgroundStatus {
    running: bool,
    pid: Option<u32>,
    pid_file: PathBuf,
}

/// Start a background session handled by a detached worker.
///
/// # Errors
///
/// Returns an error for a zero duration, if a worker is already recorded,
/// or if the worker cannot be started.
pub fn enable(
    ctx: &Context,
    minutes: u32,
    pid_file: Option<PathBuf>,
) -> Result<String, AlfredError> {
    let path = ctx.pid_file(pid_file);
    let runner = ctx.runner();
    let system = ctx.system();
    let legacy = LegacyFocus::new(&system, &runner, PidFile::new(&path));

    let pid = legacy.enable(minutes, || spawn_worker(ctx, minutes, &path))?;

    match ctx.format {
        OutputFormat::Json => to_json(&BackgroundStatus {
            running: true,
            pid: Some(pid),
            pid_file: path,
        }),
        OutputFormat::Pretty => Ok(format!(
            "{} (worker pid {pid})",
            format!("Focus set for {minutes} minute(s)").green().bold()
        )),
    }
}

/// Kill the background worker and restore the system.
///
/// # Errors
///
/// Returns `AlfredError::NotRunning` if no worker is recorded.
pub fn disable(ctx: &Context, pid_file: Option<PathBuf>) -> Result<String, AlfredError> {
    let path = ctx.pid_file(pid_file);
    let runner = ctx.runner();
    let system = ctx.system();
    LegacyFocus::new(&system, &runner, PidFile::new(&path)).disable()?;

    match ctx.format {
        OutputFormat::Json => to_json(&BackgroundStatus {
            running: false,
            pid: None,
            pid_file: path,
        }),
        OutputFormat::Pretty => Ok("Focus disabled".green().bold().to_string()),
    }
}

/// Report whether a background worker is recorded.
///
/// # Errors
///
/// Returns an error if the PID file cannot be read.
pub fn status(ctx: &Context, pid_file: Option<PathBuf>) -> Result<String, AlfredError> {
    let path = ctx.pid_file(pid_file);
    let runner = ctx.runner();
    let system = ctx.system();
    let pid = LegacyFocus::new(&system, &runner, PidFile::new(&path)).running_pid()?;

    match ctx.format {
        OutputFormat::Json => to_json(&BackgroundStatus {
            running: pid.is_some(),
            pid,
            pid_file: path,
        }),
        OutputFormat::Pretty => Ok(pid.map_or_else(
            || "Focus is not running".dimmed().to_string(),
            |pid| format!("{} (worker pid {pid})", "Focus is running".green().bold()),
        )),
    }
}

/// Worker body: sleep out the session, then restore.
///
/// # Errors
///
/// Returns an error if the PID file cannot be cleaned up.
pub fn daemon(
    ctx: &Context,
    minutes: u32,
    pid_file: Option<PathBuf>,
) -> Result<String, AlfredError> {
    let path = ctx.pid_file(pid_file);
    let runner = ctx.runner();
    let system = ctx.system();
    LegacyFocus::new(&system, &runner, PidFile::new(&path)).run_worker(
        minutes,
        std::process::id(),
        std::thread::sleep,
    )?;
    Ok(String::new())
}

fn spawn_worker(ctx: &Context, minutes: u32, pid_file: &Path) -> Result<u32, AlfredError> {
    let exe = std::env::current_exe()?;
    let child = Command::new(exe)
        .arg("daemon")
        .arg(minutes.to_string())
        .arg("--pid-file")
        .arg(pid_file)
        .arg("--config")
        .arg(&ctx.config_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    tracing::debug!(pid = child.id(), "spawned focus worker");
    Ok(child.id())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::Config;

    fn context(dir: &TempDir, format: OutputFormat) -> Context {
        Context {
            config: Config::default(),
            config_path: dir.path().join("config.yaml"),
            format,
        }
    }

    #[test]
    fn test_status_without_worker() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Pretty);

        let out = status(&ctx, Some(dir.path().join("none.pid"))).unwrap();
        assert_eq!(out, "Focus is not running");
    }

    #[test]
    fn test_status_json_with_worker() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Json);
        let path = dir.path().join("focus.pid");
        std::fs::write(&path, "321").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&status(&ctx, Some(path)).unwrap()).unwrap();
        assert_eq!(json["running"], true);
        assert_eq!(json["pid"], 321);
    }

    #[test]
    fn test_disable_without_worker() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Pretty);

        let err = disable(&ctx, Some(dir.path().join("none.pid"))).unwrap_err();
        assert!(matches!(err, AlfredError::NotRunning));
    }
}

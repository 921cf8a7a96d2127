//! Background focus tracked through a PID file.
//!
//! `enable` starts a detached worker process that waits out the session and
//! then restores the system; `disable` finds that worker through the PID
//! file and kills it early. The foreground commands and the menu do not use
//! this; they cancel in-process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::session::{FocusState, Session};
use crate::error::AlfredError;
use crate::system::{CommandRunner, ExternalCommand, FocusBackend};

/// Single-line file holding the worker's process id.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded pid, if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::Config` if the file holds something other than
    /// a pid, or `AlfredError::Io` if it cannot be read.
    pub fn read(&self) -> Result<Option<u32>, AlfredError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        contents.trim().parse::<u32>().map(Some).map_err(|_| {
            AlfredError::Config(format!(
                "PID file {} is corrupt: {:?}",
                self.path.display(),
                contents.trim()
            ))
        })
    }

    /// Record `pid`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::Io` if the file cannot be written.
    pub fn write(&self, pid: u32) -> Result<(), AlfredError> {
        std::fs::write(&self.path, pid.to_string())?;
        Ok(())
    }

    /// Delete the file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::Io` if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<(), AlfredError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Enable/disable commands for the background variant.
pub struct LegacyFocus<'a, B, R> {
    backend: &'a B,
    runner: &'a R,
    pid_file: PidFile,
}

impl<'a, B: FocusBackend, R: CommandRunner> LegacyFocus<'a, B, R> {
    pub const fn new(backend: &'a B, runner: &'a R, pid_file: PidFile) -> Self {
        Self {
            backend,
            runner,
            pid_file,
        }
    }

    /// Turn focus on and hand the countdown to a worker process.
    ///
    /// `spawn_worker` starts the worker and returns its pid.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::InvalidDuration` for zero minutes,
    /// `AlfredError::AlreadyRunning` if a worker is recorded, or the
    /// worker spawn / PID file error.
    pub fn enable<F>(&self, minutes: u32, spawn_worker: F) -> Result<u32, AlfredError>
    where
        F: FnOnce() -> Result<u32, AlfredError>,
    {
        Session::from_minutes(minutes)?;
        if self.pid_file.read()?.is_some() {
            return Err(AlfredError::AlreadyRunning);
        }

        warn_on_failure(self.backend.set_dnd(FocusState::On, minutes));
        warn_on_failure(self.backend.toggle_dock());

        // Without a recorded worker nothing would ever turn focus back off.
        let pid = match spawn_worker() {
            Ok(pid) => pid,
            Err(e) => {
                self.restore();
                return Err(e);
            }
        };
        if let Err(e) = self.pid_file.write(pid) {
            self.kill(pid);
            self.restore();
            return Err(e);
        }

        tracing::info!(pid, minutes, "background focus started");
        Ok(pid)
    }

    /// Kill the worker early and restore the system.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::NotRunning` if no worker is recorded.
    pub fn disable(&self) -> Result<(), AlfredError> {
        let pid = self.pid_file.read()?.ok_or(AlfredError::NotRunning)?;

        self.kill(pid);
        self.pid_file.remove()?;

        self.restore();
        tracing::info!(pid, "background focus disabled");
        Ok(())
    }

    /// Body of the worker process: wait out the session, then restore.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::Io` if the PID file cannot be removed.
    pub fn run_worker<S>(&self, minutes: u32, own_pid: u32, sleep: S) -> Result<(), AlfredError>
    where
        S: FnOnce(Duration),
    {
        sleep(Duration::from_secs(u64::from(minutes) * 60));
        self.restore();

        // Leave the file alone if a newer worker has taken over.
        if self.pid_file.read().ok().flatten() == Some(own_pid) {
            self.pid_file.remove()?;
        }
        Ok(())
    }

    /// The recorded worker pid, if any.
    ///
    /// # Errors
    ///
    /// See [`PidFile::read`].
    pub fn running_pid(&self) -> Result<Option<u32>, AlfredError> {
        self.pid_file.read()
    }

    fn kill(&self, pid: u32) {
        let kill = ExternalCommand::new("kill").arg("-9").arg(pid.to_string());
        if let Err(e) = self.runner.run(&kill) {
            // The worker may already have exited on its own.
            tracing::warn!(pid, error = %e, "could not kill focus worker");
        }
    }

    fn restore(&self) {
        warn_on_failure(self.backend.set_dnd(FocusState::Off, 0));
        warn_on_failure(self.backend.toggle_dock());
    }
}

fn warn_on_failure(result: Result<(), AlfredError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "system request failed");
        eprintln!("warning: {e}");
    }
}

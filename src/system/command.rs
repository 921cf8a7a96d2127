//! Running external macOS tools with a timeout.

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::AlfredError;

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single invocation of an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Text piped to the program's stdin, if any.
    pub stdin: Option<String>,
}

impl ExternalCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Pipe text to stdin.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// The command line, for logging.
    #[must_use]
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Captured stdout of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

/// Executes external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run the command to completion.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::ExternalTool` if the program is missing, exits
    /// with a non-zero status, or does not finish in time.
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, AlfredError>;
}

/// Runs commands as child processes, killing them after a timeout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn spawn(command: &ExternalCommand) -> Result<Child, AlfredError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AlfredError::external(&command.program, format!("could not start: {e}")))?;

        if let Some(input) = &command.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes()).map_err(|e| {
                    AlfredError::external(&command.program, format!("could not write stdin: {e}"))
                })?;
                // Dropping the pipe closes stdin so the program sees EOF.
            }
        }

        Ok(child)
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, AlfredError> {
        tracing::debug!(command = %command.display(), "running external command");

        let mut child = Self::spawn(command)?;
        // Drain both pipes while waiting so a chatty child cannot fill one and stall.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let started = Instant::now();

        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if started.elapsed() >= self.timeout => {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(AlfredError::external(
                        &command.program,
                        format!("timed out after {}s", self.timeout.as_secs()),
                    ));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        if !status.success() {
            let stderr = stderr.join().unwrap_or_default();
            return Err(AlfredError::from_stderr(&command.program, &stderr));
        }

        Ok(CommandOutput { stdout })
    }
}

/// Read `pipe` to the end on its own thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).ok();
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

//! Synchronous execution of external programs (generator, package manager, registry)

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

/// An external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Program looked up in PATH (e.g. "npm")
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; inherits the caller's when unset
    pub cwd: Option<PathBuf>,
    /// Inherit the terminal instead of capturing stdout
    pub interactive: bool,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            interactive: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// The command as a user would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Failure to run an external program to a successful exit
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}{detail}")]
    Failed {
        command: String,
        status: String,
        /// Pre-formatted ": <stderr>" suffix, empty when nothing was captured
        detail: String,
    },

    #[error("`{command}` printed output that is not valid UTF-8")]
    InvalidOutput { command: String },
}

/// Runs a command to completion and returns its captured stdout
///
/// Interactive commands return an empty string since their output goes
/// straight to the terminal.
pub trait CommandExecutor {
    fn execute(&self, command: &ShellCommand) -> Result<String, ExecError>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, command: &ShellCommand) -> Result<String, ExecError> {
        (**self).execute(command)
    }
}

/// Executor backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, command: &ShellCommand) -> Result<String, ExecError> {
        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.cwd {
            process.current_dir(dir);
        }

        debug!(command = %command, cwd = ?command.cwd, interactive = command.interactive, "executing");

        let spawn_error = |source| ExecError::Spawn {
            command: command.command_line(),
            source,
        };

        if command.interactive {
            let status = process
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_error)?;

            return if status.success() {
                Ok(String::new())
            } else {
                Err(failure(command, status, &[]))
            };
        }

        let output = process.stdin(Stdio::null()).output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(failure(command, output.status, &output.stderr));
        }

        String::from_utf8(output.stdout).map_err(|_| ExecError::InvalidOutput {
            command: command.command_line(),
        })
    }
}

fn failure(command: &ShellCommand, status: ExitStatus, stderr: &[u8]) -> ExecError {
    let status = match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    };
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    let detail = if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    };

    ExecError::Failed {
        command: command.command_line(),
        status,
        detail,
    }
}

use std::io;
use std::io::Read;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use tracing::debug;
use tracing::info;
use xd_core::contracts::ExecError;
use xd_core::contracts::Executor;

pub const DEFAULT_SHELL: &str = "bash";

/// Runs command lines as `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Runs `command` with stdout and stderr writing into one pipe, so the
    /// output keeps the order in which it was written.
    fn run_combined(&self, command: &str) -> io::Result<(ExitStatus, String)> {
        let (mut reader, writer) = os_pipe::pipe()?;
        let stderr = writer.try_clone()?;
        let mut child = {
            let mut process = Command::new(&self.shell);
            process
                .arg("-c")
                .arg(command)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr);
            process.spawn()?
        };
        // `process` is gone here, so its write ends are closed and the read
        // below ends when the child does.

        let mut output = Vec::new();
        reader.read_to_end(&mut output)?;
        let status = child.wait()?;
        Ok((status, String::from_utf8_lossy(&output).into_owned()))
    }
}

impl Executor for ShellExecutor {
    fn run(&mut self, command: &str) -> Result<String, ExecError> {
        info!(command, "executing command");
        let (status, output) = self.run_combined(command).map_err(|err| ExecError {
            command: command.to_string(),
            message: format!("failed to start {}: {err}", self.shell),
        })?;

        if status.success() {
            return Ok(output);
        }

        debug!(command, %status, "command exited unsuccessfully");
        let message = if output.is_empty() {
            status.to_string()
        } else {
            output
        };
        Err(ExecError {
            command: command.to_string(),
            message,
        })
    }
}

//! External process execution
//!
//! This module provides:
//! - The CommandRunner trait the orchestrator uses for `go get` and hooks
//! - A system runner that captures or inherits process output
//! - Whitespace splitting of hook command strings

use crate::error::CommandError;
use std::process::{Command, Stdio};

/// Output of a finished external command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// The command line that was executed
    pub command: String,
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit status description
    pub status: String,
    /// Captured standard output (empty when inherited)
    pub stdout: String,
    /// Captured standard error (empty when inherited)
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            status: "exit status: 0".to_string(),
            ..Self::default()
        }
    }

    /// Create a failed output
    pub fn failure(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            status: "exit status: 1".to_string(),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// Convert an unsuccessful exit into an error
    pub fn check(&self) -> Result<(), CommandError> {
        if self.success {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: self.command.clone(),
                status: self.status.clone(),
            })
        }
    }
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to finish
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError>;
}

/// Runs real processes with the current environment
#[derive(Debug, Default)]
pub struct SystemCommandRunner {
    /// Inherit stdout/stderr instead of capturing them
    inherit_output: bool,
}

impl SystemCommandRunner {
    /// Create a runner that captures process output
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that lets processes write straight to the terminal
    pub fn inheriting() -> Self {
        Self {
            inherit_output: true,
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        let command_line = display_command(program, args);
        tracing::debug!(command = %command_line, "running");

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());

        let spawn_error = |source| CommandError::Spawn {
            command: command_line.clone(),
            source,
        };

        let (status, stdout, stderr) = if self.inherit_output {
            let status = command.status().map_err(spawn_error)?;
            (status, String::new(), String::new())
        } else {
            let output = command.output().map_err(spawn_error)?;
            (
                output.status,
                String::from_utf8_lossy(&output.stdout).to_string(),
                String::from_utf8_lossy(&output.stderr).to_string(),
            )
        };

        Ok(CommandOutput {
            command: command_line,
            success: status.success(),
            status: status.to_string(),
            stdout,
            stderr,
        })
    }
}

/// Split a hook command string into program and arguments
///
/// Splitting is on whitespace only; there is no shell quoting.
pub fn split_command(command: &str) -> Result<(String, Vec<String>), CommandError> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(CommandError::Empty)?;
    Ok((program, parts.collect()))
}

/// Render a command line for display
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

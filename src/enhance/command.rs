//! Subprocess execution with a testable seam.
//!
//! The `CommandExecutor` trait lets the external enhancer run without a real
//! binary in tests.

use crate::error::{Result, VocaliftError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args`, killing it if it outlives `timeout`.
    ///
    /// Returns an error if the program is missing, exits non-zero or times out.
    async fn execute(&self, program: &str, args: &[String], timeout: Duration)
    -> Result<CommandOutput>;
}

/// Production command executor using `tokio::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput> {
        let child = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output();

        // Dropping the timed-out future drops the child, which kills it.
        let output = tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| VocaliftError::ExternalToolTimeout {
                tool: program.to_string(),
                timeout_secs: timeout.as_secs(),
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    VocaliftError::ExternalToolNotFound {
                        tool: program.to_string(),
                    }
                } else {
                    VocaliftError::ExternalToolFailed {
                        message: format!("Failed to execute {}: {}", program, e),
                    }
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(VocaliftError::ExternalToolFailed {
                message: format!(
                    "{} failed with status {:?}: {}",
                    program,
                    output.status.code(),
                    stderr.trim()
                ),
            });
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr,
        })
    }
}

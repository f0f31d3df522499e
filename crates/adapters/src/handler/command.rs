// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command handler.
//!
//! The configured string is handed to `sh -c` verbatim after placeholder
//! expansion. Whoever configures failhook is trusted with their own shell;
//! placeholder values are not escaped, so `__OUTPUT__` inside the command
//! is subject to shell interpretation.

use super::{FailureHandler, HandlerError};
use async_trait::async_trait;
use failhook_core::PlaceholderRegistry;
use std::os::unix::process::ExitStatusExt;
use tokio::process::Command;

/// Runs a shell command on failure, inheriting stdio.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    command: String,
    shell: String,
    registry: PlaceholderRegistry,
}

impl CommandHandler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: "sh".to_string(),
            registry: PlaceholderRegistry::new(),
        }
    }

    /// Use a different POSIX shell than `sh`.
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_registry(mut self, registry: PlaceholderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.registry
    }
}

#[async_trait]
impl FailureHandler for CommandHandler {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        let command = self.registry.replace(&self.command, exit_code, output);
        tracing::debug!(shell = %self.shell, %command, "running failure command");

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .map_err(HandlerError::Spawn)?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(HandlerError::CommandFailed(code)),
            None => Err(HandlerError::CommandKilled(
                status.signal().unwrap_or_default(),
            )),
        }
    }

    fn description(&self) -> String {
        format!("Execute command: {}", self.command)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure handlers
//!
//! Each handler owns its template and its own placeholder registry. The
//! supervisor calls [`FailureHandler::handle`] once per failed run.

mod command;
mod slack;
mod syslog;
mod webhook;

pub use command::CommandHandler;
pub use slack::{SlackHandler, SlackMessage, DEFAULT_SLACK_USERNAME};
pub use syslog::SyslogHandler;
pub use webhook::WebhookHandler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHandler, HandlerCall, HandlerJournal};


use async_trait::async_trait;
use thiserror::Error;

/// Errors from handler actions
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to start shell: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("command exited with status {0}")]
    CommandFailed(i32),
    #[error("command terminated by signal {0}")]
    CommandKilled(i32),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook returned status code {0}")]
    WebhookStatus(u16),
    #[error("slack API returned status code {0}")]
    SlackStatus(u16),
    #[error("error marshaling Slack message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("syslog unavailable: {0}")]
    Syslog(#[source] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Action taken when the monitored command fails.
#[async_trait]
pub trait FailureHandler: Send + Sync {
    /// Run the action for a failed command.
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError>;

    /// Human-readable summary used in diagnostics.
    fn description(&self) -> String;
}

#[async_trait]
impl<H: FailureHandler + ?Sized> FailureHandler for Box<H> {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        (**self).handle(exit_code, output).await
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

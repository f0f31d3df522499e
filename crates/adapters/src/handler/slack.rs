// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slack incoming-webhook handler.

use super::{FailureHandler, HandlerError};
use async_trait::async_trait;
use failhook_core::PlaceholderRegistry;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Bot name shown in Slack unless overridden.
pub const DEFAULT_SLACK_USERNAME: &str = "FailHook";

/// Incoming-webhook payload. Empty `channel`/`username` are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
}

/// Posts a message to a Slack incoming webhook on failure.
#[derive(Debug, Clone)]
pub struct SlackHandler {
    webhook_url: String,
    message: String,
    channel: String,
    username: String,
    client: reqwest::Client,
    registry: PlaceholderRegistry,
}

impl SlackHandler {
    pub fn new(webhook_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            message: message.into(),
            channel: String::new(),
            username: DEFAULT_SLACK_USERNAME.to_string(),
            client: reqwest::Client::new(),
            registry: PlaceholderRegistry::new(),
        }
    }

    /// Post to a channel other than the webhook's default.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Bot name; an empty name leaves the webhook's own setting in place.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_registry(mut self, registry: PlaceholderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.registry
    }

    /// Payload for a failure, with placeholders expanded.
    pub fn payload(&self, exit_code: i32, output: &str) -> SlackMessage {
        SlackMessage {
            text: self.registry.replace(&self.message, exit_code, output),
            channel: self.channel.clone(),
            username: self.username.clone(),
        }
    }
}

#[async_trait]
impl FailureHandler for SlackHandler {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        let body = serde_json::to_vec(&self.payload(exit_code, output))?;
        tracing::debug!(channel = %self.channel, bytes = body.len(), "posting to slack");

        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HandlerError::SlackStatus(status.as_u16()));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Send to Slack: {}", self.message)
    }
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP GET webhook handler.

use super::{FailureHandler, HandlerError};
use async_trait::async_trait;
use failhook_core::PlaceholderRegistry;

/// Calls a URL on failure. Substituted values are query-encoded.
#[derive(Debug, Clone)]
pub struct WebhookHandler {
    url: String,
    client: reqwest::Client,
    registry: PlaceholderRegistry,
}

impl WebhookHandler {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            registry: PlaceholderRegistry::new(),
        }
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
impl FailureHandler for WebhookHandler {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        let url = self.registry.replace_url_encoded(&self.url, exit_code, output);
        tracing::debug!(%url, "calling webhook");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(HandlerError::WebhookStatus(status.as_u16()));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Call webhook: {}", self.url)
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake failure handler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FailureHandler, HandlerError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded handler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerCall {
    pub handler: String,
    pub exit_code: i32,
    pub output: String,
}

/// Call log that several fakes can share to observe dispatch order.
#[derive(Debug, Clone, Default)]
pub struct HandlerJournal {
    calls: Arc<Mutex<Vec<HandlerCall>>>,
}

impl HandlerJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HandlerCall> {
        self.calls.lock().clone()
    }

    /// Handler names in invocation order.
    pub fn order(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.handler.clone()).collect()
    }
}

/// Fake failure handler for testing
#[derive(Debug, Clone)]
pub struct FakeHandler {
    name: String,
    fail_with: Option<String>,
    journal: HandlerJournal,
}

impl FakeHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail_with: None,
            journal: HandlerJournal::new(),
        }
    }

    /// Fake that records the call and then returns `message` as an error.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new(name)
        }
    }

    /// Record into `journal` instead of a private one.
    pub fn with_journal(mut self, journal: &HandlerJournal) -> Self {
        self.journal = journal.clone();
        self
    }

    pub fn journal(&self) -> HandlerJournal {
        self.journal.clone()
    }

    pub fn calls(&self) -> Vec<HandlerCall> {
        self.journal
            .calls()
            .into_iter()
            .filter(|c| c.handler == self.name)
            .collect()
    }
}

#[async_trait]
impl FailureHandler for FakeHandler {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        self.journal.calls.lock().push(HandlerCall {
            handler: self.name.clone(),
            exit_code,
            output: output.to_string(),
        });
        match &self.fail_with {
            Some(message) => Err(HandlerError::Other(message.clone())),
            None => Ok(()),
        }
    }

    fn description(&self) -> String {
        format!("Fake handler: {}", self.name)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

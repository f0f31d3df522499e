// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the monitored process and failure handlers

mod env;
pub mod handler;
pub mod subprocess;

pub use handler::{
    CommandHandler, FailureHandler, HandlerError, SlackHandler, SlackMessage, SyslogHandler,
    WebhookHandler, DEFAULT_SLACK_USERNAME,
};
pub use subprocess::{run_command, ExecutionResult, RunError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use handler::{FakeHandler, HandlerCall, HandlerJournal};

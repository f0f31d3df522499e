// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final classification of a supervised run.

use crate::context::ContextError;
use std::time::Duration;

/// Exit code reported when the run hit its deadline.
pub const TIMEOUT_EXIT_CODE: i32 = 124;
/// Exit code reported when the run was interrupted by a signal.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;
/// Exit code for launch failures and signal deaths without a status.
pub const GENERIC_FAILURE_EXIT_CODE: i32 = 1;

/// What ended the run, after context classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The command's own exit code and output are reported.
    Completed,
    TimedOut,
    Interrupted,
}

/// Exit code and output that handlers see and the process exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub output: String,
    pub termination: Termination,
}

impl Outcome {
    /// Apply the context's verdict to what the command reported.
    ///
    /// A deadline overrides everything. A cancellation only counts when the
    /// command itself reported an error; a command that finished cleanly just
    /// as the signal arrived keeps its own result.
    pub fn classify(
        exit_code: i32,
        output: String,
        command_failed: bool,
        ctx_err: Option<ContextError>,
        timeout: Option<Duration>,
    ) -> Self {
        match ctx_err {
            Some(ContextError::DeadlineExceeded) => Self {
                exit_code: TIMEOUT_EXIT_CODE,
                output: timeout_message(timeout.unwrap_or_default()),
                termination: Termination::TimedOut,
            },
            Some(ContextError::Canceled) if command_failed => Self {
                exit_code: INTERRUPTED_EXIT_CODE,
                output: INTERRUPTED_MESSAGE.to_string(),
                termination: Termination::Interrupted,
            },
            _ => Self {
                exit_code,
                output,
                termination: Termination::Completed,
            },
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Output substituted for a run that was interrupted.
pub const INTERRUPTED_MESSAGE: &str = "Command was interrupted";

/// Output substituted for a run that hit its deadline.
pub fn timeout_message(timeout: Duration) -> String {
    format!("Command timed out after {} seconds", timeout.as_secs())
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

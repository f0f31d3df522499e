// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run supervision and failure dispatch.
//!
//! A [`Supervisor`] moves through `Idle -> Running -> {Succeeded, Failed}`
//! once per run. After the command returns, the run context decides whether
//! its result stands or is replaced by a synthetic timeout (124) or interrupt
//! (130) result. Any non-zero outcome is dispatched to every handler, in
//! registration order, before the run is reported.

use failhook_adapters::subprocess;
use failhook_adapters::{ExecutionResult, FailureHandler};
use failhook_core::{Outcome, RunContext, Termination};
use std::fmt;
use std::time::Instant;

/// Where a supervisor is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Runs the monitored command and dispatches failures to handlers.
pub struct Supervisor {
    handlers: Vec<Box<dyn FailureHandler>>,
    debug: bool,
    state: RunState,
}

impl Supervisor {
    pub fn new(debug: bool) -> Self {
        Self {
            handlers: Vec::new(),
            debug,
            state: RunState::Idle,
        }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Descriptions of the registered handlers, in dispatch order.
    pub fn handler_descriptions(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.description()).collect()
    }

    /// Append a handler. Handlers run in the order they were added.
    pub fn add_handler(&mut self, handler: impl FailureHandler + 'static) {
        if self.debug {
            tracing::info!(handler = %handler.description(), "added handler");
        }
        self.handlers.push(Box::new(handler));
    }

    /// Run `command` once under `ctx` and capture its result.
    pub async fn run_command(
        &self,
        ctx: &RunContext,
        command: &str,
        args: &[String],
    ) -> ExecutionResult {
        if self.debug {
            tracing::info!(command = %command_line(command, args), "running command");
        }
        let start = Instant::now();

        let result = subprocess::run_command(ctx, command, args).await;

        if self.debug {
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                exit_code = result.exit_code,
                "command completed"
            );
        }
        result
    }

    /// Invoke every handler in order. Handler errors are logged, never
    /// propagated, and never stop the remaining handlers.
    pub async fn handle_failure(&self, exit_code: i32, output: &str) {
        for handler in &self.handlers {
            let description = handler.description();
            if self.debug {
                tracing::info!(handler = %description, "executing handler");
            }
            if let Err(e) = handler.handle(exit_code, output).await {
                tracing::error!(handler = %description, error = %e, "handler failed");
            }
        }
    }

    /// Supervise one run of `command` and dispatch handlers if it failed.
    pub async fn run(&mut self, ctx: &RunContext, command: &str, args: &[String]) -> Outcome {
        self.state = RunState::Running;

        let result = self.run_command(ctx, command, args).await;
        if let Some(err) = &result.error {
            tracing::debug!(error = %err, "command reported an error");
        }

        let outcome = Outcome::classify(
            result.exit_code,
            result.output,
            result.error.is_some(),
            ctx.err(),
            ctx.timeout(),
        );
        match outcome.termination {
            Termination::TimedOut | Termination::Interrupted => {
                tracing::warn!("{}", outcome.output);
            }
            Termination::Completed => {}
        }

        if outcome.succeeded() {
            self.state = RunState::Succeeded;
            if self.debug {
                tracing::info!("command succeeded, exiting normally");
            }
        } else {
            self.state = RunState::Failed;
            if self.debug {
                tracing::info!(
                    exit_code = outcome.exit_code,
                    "command failed, executing handlers"
                );
            }
            self.handle_failure(outcome.exit_code, &outcome.output).await;
        }
        outcome
    }
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("handlers", &self.handler_descriptions())
            .field("debug", &self.debug)
            .field("state", &self.state)
            .finish()
    }
}

fn command_line(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;

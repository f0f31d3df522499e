// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution for the monitored command.
//!
//! The child runs with stdin from the null device while stdout and stderr are
//! drained by two independent reader tasks. When the [`RunContext`] is
//! cancelled or its deadline passes, the child is killed and reaped; it may
//! still win the race and exit on its own first, in which case its real
//! status is reported.

use failhook_core::outcome::GENERIC_FAILURE_EXIT_CODE;
use failhook_core::{ContextError, RunContext};
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

/// How long to keep draining pipes after a killed child has been reaped.
///
/// Grandchildren that inherited the pipes can hold them open indefinitely.
const KILLED_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Why a run did not end in a clean exit.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("exit status {0}")]
    Exited(i32),
    #[error("terminated by signal {0}")]
    Signaled(i32),
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Result of one supervised command.
#[derive(Debug)]
pub struct ExecutionResult {
    pub exit_code: i32,
    /// stdout followed by stderr, trimmed of surrounding whitespace.
    pub output: String,
    pub error: Option<RunError>,
}

impl ExecutionResult {
    fn launch_failed(error: RunError) -> Self {
        Self {
            exit_code: GENERIC_FAILURE_EXIT_CODE,
            output: String::new(),
            error: Some(error),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// Run `command` with `args` until it exits or `ctx` is done.
pub async fn run_command(ctx: &RunContext, command: &str, args: &[String]) -> ExecutionResult {
    if let Some(err) = ctx.err() {
        return ExecutionResult::launch_failed(err.into());
    }

    let mut cmd = Command::new(command);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => {
            tracing::debug!(command, error = %source, "spawn failed");
            return ExecutionResult::launch_failed(RunError::Spawn {
                command: command.to_string(),
                source,
            });
        }
    };
    tracing::debug!(command, pid = child.id(), "spawned");

    let mut stdout_task = tokio::spawn(read_stream(child.stdout.take()));
    let mut stderr_task = tokio::spawn(read_stream(child.stderr.take()));

    let (waited, killed) = wait_or_kill(ctx, &mut child).await;

    let (stdout, stderr) = if killed {
        let drained = tokio::time::timeout(KILLED_DRAIN_GRACE, async {
            tokio::join!(&mut stdout_task, &mut stderr_task)
        })
        .await;
        match drained {
            Ok((out, err)) => (out.unwrap_or_default(), err.unwrap_or_default()),
            Err(_) => {
                tracing::debug!(command, "output pipes still open after kill, giving up");
                stdout_task.abort();
                stderr_task.abort();
                (Vec::new(), Vec::new())
            }
        }
    } else {
        tokio::select! {
            (out, err) = async { tokio::join!(&mut stdout_task, &mut stderr_task) } => {
                (out.unwrap_or_default(), err.unwrap_or_default())
            }
            _ = ctx.cancelled() => {
                tracing::debug!(command, "context done while draining output");
                stdout_task.abort();
                stderr_task.abort();
                (Vec::new(), Vec::new())
            }
        }
    };

    let output = combine_output(&stdout, &stderr);
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let status = match waited {
        Ok(status) => status,
        Err(source) => {
            tracing::debug!(command, elapsed_ms, error = %source, "wait failed");
            return ExecutionResult {
                exit_code: GENERIC_FAILURE_EXIT_CODE,
                output,
                error: Some(RunError::Wait {
                    command: command.to_string(),
                    source,
                }),
            };
        }
    };

    let exit_code = exit_code_of(status);
    let error = if killed {
        Some(RunError::Context(ctx.err().unwrap_or(ContextError::Canceled)))
    } else {
        status_error(status)
    };
    tracing::debug!(command, exit_code, elapsed_ms, killed, "completed");

    ExecutionResult {
        exit_code,
        output,
        error,
    }
}

/// Wait for the child; kill it if the context finishes first.
///
/// Returns the wait result and whether the child was killed.
async fn wait_or_kill(ctx: &RunContext, child: &mut Child) -> (io::Result<ExitStatus>, bool) {
    tokio::select! {
        status = child.wait() => (status, false),
        _ = ctx.cancelled() => {
            tracing::debug!(pid = child.id(), reason = ?ctx.err(), "context done, killing child");
            if let Err(e) = child.start_kill() {
                // Already exited between the select and the kill.
                tracing::debug!(error = %e, "kill failed");
            }
            (child.wait().await, true)
        }
    }
}

async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        if let Err(e) = stream.read_to_end(&mut buf).await {
            tracing::debug!(error = %e, "pipe read failed");
        }
    }
    buf
}

/// Numeric exit status, or the generic failure code when the process was
/// terminated without one.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(GENERIC_FAILURE_EXIT_CODE)
}

fn status_error(status: ExitStatus) -> Option<RunError> {
    if status.success() {
        return None;
    }
    Some(match status.code() {
        Some(code) => RunError::Exited(code),
        None => RunError::Signaled(status.signal().unwrap_or_default()),
    })
}

/// stdout then stderr, with surrounding whitespace trimmed.
pub fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined.trim().to_string()
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;

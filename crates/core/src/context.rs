// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation and deadline scope for a supervised run.
//!
//! A [`RunContext`] is shared between the task waiting on the monitored
//! command and the signal listener. Cancelling it (or letting its deadline
//! pass) wakes every [`cancelled`](RunContext::cancelled) waiter. The first
//! cause to land is kept, so a later [`err`](RunContext::err) tells a timeout
//! apart from an interrupt.

use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellable execution scope with an optional deadline.
///
/// Clones share state: cancelling any clone cancels all of them.
#[derive(Debug, Clone)]
pub struct RunContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    cause: Arc<OnceLock<ContextError>>,
}

impl RunContext {
    /// Context that is only done once cancelled.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
            timeout: None,
            cause: Arc::new(OnceLock::new()),
        }
    }

    /// Context that expires `timeout` from now. A timeout too large to
    /// represent as an instant never expires.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self {
                deadline: Some(deadline),
                timeout: Some(timeout),
                ..Self::background()
            },
            None => Self::background(),
        }
    }

    /// Context with a deadline only when `timeout` is non-zero.
    pub fn with_optional_timeout(timeout: Duration) -> Self {
        if timeout.is_zero() {
            Self::background()
        } else {
            Self::with_timeout(timeout)
        }
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Request cancellation. Idempotent; an earlier cause is kept.
    pub fn cancel(&self) {
        self.expire_if_due();
        self.finish(ContextError::Canceled);
    }

    /// `None` while the context is live, otherwise the first cause.
    pub fn err(&self) -> Option<ContextError> {
        self.expire_if_due();
        self.cause.get().copied()
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn cancelled(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {
                        self.finish(ContextError::DeadlineExceeded);
                    }
                }
            }
            None => self.token.cancelled().await,
        }
    }

    fn expire_if_due(&self) {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.finish(ContextError::DeadlineExceeded);
        }
    }

    fn finish(&self, cause: ContextError) {
        let _ = self.cause.set(cause);
        self.token.cancel();
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! failhook-core: placeholder expansion, run context and outcome rules

pub mod clock;
pub mod context;
pub mod outcome;
pub mod placeholder;

pub use clock::{Clock, SystemClock};
pub use context::{ContextError, RunContext};
pub use outcome::{Outcome, Termination, INTERRUPTED_EXIT_CODE, TIMEOUT_EXIT_CODE};
pub use placeholder::{PlaceholderFn, PlaceholderRegistry};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;

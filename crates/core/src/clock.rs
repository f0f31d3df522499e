// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock access for time-based placeholders.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current local time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::Clock;
    use chrono::{DateTime, FixedOffset, TimeDelta};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Manually driven clock for tests.
    #[derive(Clone, Debug)]
    pub struct FakeClock {
        now: Arc<Mutex<DateTime<FixedOffset>>>,
    }

    impl FakeClock {
        pub fn new(at: DateTime<FixedOffset>) -> Self {
            Self {
                now: Arc::new(Mutex::new(at)),
            }
        }

        pub fn set(&self, at: DateTime<FixedOffset>) {
            *self.now.lock() = at;
        }

        pub fn advance(&self, by: TimeDelta) {
            let mut now = self.now.lock();
            *now += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<FixedOffset> {
            *self.now.lock()
        }
    }
}

//! Nullable clock — deterministic time for testing.

use gauss_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicI64, Ordering};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Shareable across threads so a service
/// under test and the test body can hold the same clock.
pub struct NullClock {
    current_micros: AtomicI64,
}

impl NullClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current_micros: AtomicI64::new(initial.as_micros()),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current_micros
            .fetch_add(secs.saturating_mul(1_000_000), Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, now: Timestamp) {
        self.current_micros.store(now.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.current_micros.load(Ordering::SeqCst))
    }
}

//! Deterministic clocks.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::port::outbound::clock::Clock;

/// Clock that advances by a fixed step on every reading.
///
/// A step of zero yields the same timestamp forever, which is how tests
/// provoke a generation directory collision.
pub struct SteppingClock {
    next: AtomicI64,
    step: i64,
}

impl SteppingClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }

    /// A clock frozen at `at`.
    pub fn fixed(at: i64) -> Self {
        Self::new(at, 0)
    }
}

impl Clock for SteppingClock {
    fn now_epoch_ms(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::Relaxed)
    }
}

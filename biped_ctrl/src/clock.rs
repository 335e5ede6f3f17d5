//! # Clock abstraction
//!
//! Every timed operation of the controller blocks until its deadline. Rather than spinning on the
//! clock, callers ask the [`Clock`] to sleep until a deadline, which keeps the blocking contract
//! while letting the thread yield.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::thread;
use std::time::{Duration, Instant};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds elapsed since the clock's epoch. Never decreases.
    fn now_ms(&self) -> u64;

    /// Block until `now_ms() >= deadline_ms`. Returns immediately if the deadline has passed.
    fn sleep_until(&mut self, deadline_ms: u64);

    /// Block for `duration_ms` milliseconds.
    fn sleep_ms(&mut self, duration_ms: u64) {
        let deadline = self.now_ms() + duration_ms;
        self.sleep_until(deadline);
    }
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Wall clock backed by [`Instant`], with the epoch at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn sleep_until(&mut self, deadline_ms: u64) {
        let target = self.epoch + Duration::from_millis(deadline_ms);
        let now = Instant::now();
        if target > now {
            thread::sleep(target - now);
        }
    }
}

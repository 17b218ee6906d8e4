//! Monotonic clock seam
//!
//! The manager reads time only through [`Clock`], so display-duration
//! behavior can be tested deterministically with [`ManualClock`].

use std::fmt::Debug;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of monotonic timestamps
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

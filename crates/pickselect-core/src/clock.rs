//! Time sources for selection timestamps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic seconds elapsed since some fixed start.
pub trait Clock {
    /// Returns the elapsed seconds.
    fn elapsed_secs(&self) -> f64;
}

/// Wall clock measured from its construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Starts a new clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    /// Moves the current time forward.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f64 {
        self.now.get()
    }
}

use std::time::{Duration, Instant};

use super::FrameClock;

/// Wall-clock time. Sleeps use `spin_sleep` for sub-millisecond accuracy.
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        spin_sleep::sleep(duration);
    }
}

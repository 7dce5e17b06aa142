//! Minimum-interval throttle for NexusHub calls
//!
//! One limiter is shared by every endpoint, so the budget is coarser than
//! NexusHub's per-endpoint limits but never exceeds them.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_granted_at: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_granted_at: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until `min_interval` has passed since the previous slot ended,
    /// then grant a new slot.
    pub fn await_slot(&mut self) {
        if let Some(last) = self.last_granted_at {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                log::trace!("Rate limited, sleeping {:?}", wait);
                std::thread::sleep(wait);
            }
        }
        self.last_granted_at = Some(Instant::now());
    }

    /// Run `call` inside a slot. The slot ends when the call returns.
    pub fn throttle<T>(&mut self, call: impl FnOnce() -> T) -> T {
        self.await_slot();
        let result = call();
        self.last_granted_at = Some(Instant::now());
        result
    }
}

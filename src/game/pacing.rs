//! Fixed-rate tick pacing against a monotonic clock.

use std::time::{Duration, Instant};

/// Monotonic time source the loop sleeps against.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock implementation backed by `Instant` and `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Keeps ticks on a fixed grid of deadlines.
///
/// The deadline advances by exactly one frame per tick instead of being
/// reset from "now", so a slow tick is caught up by the following ones
/// rather than shifting every later tick.
#[derive(Debug, Clone)]
pub struct Pacer {
    frame_time: Duration,
    next_tick: Instant,
}

impl Pacer {
    pub fn new(fps: u32, start: Instant) -> Self {
        Self {
            frame_time: Duration::from_nanos(1_000_000_000 / fps.max(1) as u64),
            next_tick: start,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Sleep until the end of the current tick. Returns how long it slept.
    pub fn wait<C: Clock>(&mut self, clock: &mut C) -> Duration {
        self.next_tick += self.frame_time;
        let now = clock.now();
        if self.next_tick <= now {
            return Duration::ZERO;
        }
        let delay = self.next_tick - now;
        clock.sleep(delay);
        delay
    }
}

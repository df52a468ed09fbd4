//! Wall-clock measurement around a single operation

use std::time::{Duration, Instant};

/// Monotonic time source, as an offset from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

pub struct Timer<C: Clock = MonotonicClock> {
    clock: C,
}

impl Timer<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Timer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Runs `operation` once and returns its output with the time it took.
    /// A failing operation is timed the same way; `T` is usually a `Result`.
    pub fn measure<T>(&self, operation: impl FnOnce() -> T) -> (T, Duration) {
        let start = self.clock.now();
        let output = operation();
        let end = self.clock.now();

        (output, end.saturating_sub(start))
    }
}

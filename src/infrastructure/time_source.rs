//! Time source abstraction for testability.
//!
//! Production code sleeps on the real clock; tests use [`ManualTimeSource`]
//! which only advances logical time, so a full pipeline run takes no wall time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Clock used by the pipeline runner
pub trait TimeSource: std::fmt::Debug {
    /// Current instant for measuring elapsed time
    fn now(&self) -> Instant;

    /// Wait for `duration`. Logical clocks just advance.
    fn sleep(&self, duration: Duration);

    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// System clock
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Logical clock that never blocks
#[derive(Debug)]
pub struct ManualTimeSource {
    base: Instant,
    logical_nanos: AtomicU64,
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            logical_nanos: AtomicU64::new(0),
        }
    }

    /// Move logical time forward without sleeping
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.logical_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Total logical time advanced so far
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_sleep_advances_logical_time() {
        let time = ManualTimeSource::new();
        let start = time.now();

        time.sleep(Duration::from_secs(5));

        assert_eq!(time.elapsed_since(start), Duration::from_secs(5));
        assert_eq!(time.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn real_time_source_moves_forward() {
        let time = RealTimeSource;
        let start = time.now();
        time.sleep(Duration::from_millis(1));
        assert!(time.elapsed_since(start) >= Duration::from_millis(1));
    }
}

//! Time sources for the detector
//!
//! The detector never reads a clock itself: every tick is handed its `now`.
//! These types exist for the layer that drives the detector
//! ([`StepCounter`](crate::counter::StepCounter) and the host loop):
//! - `MonotonicClock` for hosted builds (milliseconds since creation)
//! - `FixedTime` for deterministic tests
//! - `MockTimeSource` for tests that share one clock between several owners

use core::cell::Cell;

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Monotonic millisecond clock
///
/// Implementations must never go backwards. The detector subtracts with
/// saturation, so a misbehaving clock degrades debounce timing but cannot
/// panic the tick.
pub trait TimeSource {
    /// Milliseconds since boot
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Shared-reference test clock
///
/// Advances through `&self`, so a simulated sensor and the counter that
/// polls it can both hold `&MockTimeSource` and observe the same time.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    timestamp: Cell<Timestamp>,
}

impl MockTimeSource {
    /// Clock starting at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            timestamp: Cell::new(start),
        }
    }

    /// Move forward by `ms`, saturating
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get().saturating_add(ms));
    }

    /// Jump to `timestamp`
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }
}

/// Monotonic clock backed by `std::time::Instant`
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    boot: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Clock reading zero now
    pub fn new() -> Self {
        Self {
            boot: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.boot.elapsed().as_millis() as Timestamp
    }
}

/// Milliseconds elapsed from `earlier` to `later`, zero if the clock went backwards
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn mock_time_is_shared_through_references() {
        let clock = MockTimeSource::new(0);
        let reader = &clock;

        clock.advance(50);
        clock.advance(50);
        assert_eq!(reader.now(), 100);
    }

    #[test]
    fn elapsed_saturates_when_clock_goes_backwards() {
        assert_eq!(elapsed_ms(2000, 2500), 500);
        assert_eq!(elapsed_ms(2500, 2000), 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}

//! Per-tick result of the detector
//!
//! Every call to [`StepDetector::tick`](crate::detector::StepDetector::tick)
//! returns one `StepEvent`. Hosts that only care about the count read
//! `credited`; calibration tools and plots use the signal fields.

use crate::edge::EdgeOutcome;
use crate::sample::Strength;
use crate::time::Timestamp;

/// What happened on one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Time the tick was run at
    pub timestamp: Timestamp,
    /// Strength fed into the tick
    pub raw: Strength,
    /// Smoothed strength produced by the tick
    pub smoothed: Strength,
    /// Threshold after this tick's update (before any stale reset)
    pub threshold: Strength,
    /// Edge detector transition
    pub outcome: EdgeOutcome,
    /// Steps added to the count by this tick
    pub credited: u32,
    /// Step count after this tick
    pub step_count: u32,
    /// Whether the stale-motion reset fired at the end of this tick
    pub stale_reset: bool,
}

impl StepEvent {
    /// Whether this tick added to the step count
    pub fn is_step(&self) -> bool {
        self.credited > 0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StepEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "t={} smoothed={} threshold={} credited={} total={} reset={}",
            self.timestamp,
            self.smoothed,
            self.threshold,
            self.credited,
            self.step_count,
            self.stale_reset
        )
    }
}

//! Polling Step Counter
//!
//! Glue between the detector and its collaborators. A `StepCounter` owns a
//! sensor driver, a clock and a detector; each [`StepCounter::poll`] reads
//! the three axes and the time once and runs exactly one tick.
//!
//! The counter still does not own the loop. The host decides when to poll
//! and how to wait in between:
//!
//! ```rust,no_run
//! # use stridewatch_core::counter::StepCounter;
//! # use stridewatch_core::sample::{AccelerationSource, Axis};
//! # use stridewatch_core::time::FixedTime;
//! # use stridewatch_core::DetectorConfig;
//! # struct Driver;
//! # impl AccelerationSource for Driver {
//! #     fn acceleration(&mut self, _axis: Axis) -> i32 { 0 }
//! # }
//! # fn sleep_ms(_ms: u32) {}
//! let mut counter: StepCounter<_, _> =
//!     StepCounter::new(Driver, FixedTime::new(0), DetectorConfig::default());
//!
//! loop {
//!     counter.poll();
//!     sleep_ms(counter.detector().sample_interval_ms());
//! }
//! ```

use crate::config::DetectorConfig;
use crate::constants::DEFAULT_WINDOW_LEN;
use crate::detector::StepDetector;
use crate::display::{render_progress, ProgressDisplay, Rendered};
use crate::errors::ProgressResult;
use crate::events::StepEvent;
use crate::sample::{AccelerationSource, AccelerationVector};
use crate::time::TimeSource;

/// Sensor + clock + detector, ticked by polling
pub struct StepCounter<S, T, const N: usize = { DEFAULT_WINDOW_LEN }> {
    source: S,
    clock: T,
    detector: StepDetector<N>,
}

impl<S, T, const N: usize> StepCounter<S, T, N>
where
    S: AccelerationSource,
    T: TimeSource,
{
    /// Build a counter; the detector's timers start at the clock's current time
    pub fn new(source: S, clock: T, config: DetectorConfig) -> Self {
        let detector = StepDetector::new(config, clock.now());
        Self {
            source,
            clock,
            detector,
        }
    }

    /// Read one sample and run one tick
    pub fn poll(&mut self) -> StepEvent {
        let vector = AccelerationVector::read_from(&mut self.source);
        let now = self.clock.now();
        self.detector.tick_vector(vector, now)
    }

    /// Current step count
    pub fn steps(&self) -> u32 {
        self.detector.step_count()
    }

    /// Draw the step count as progress toward `target`
    pub fn graph_on_screen<D: ProgressDisplay + ?Sized>(
        &self,
        display: &mut D,
        target: u32,
    ) -> ProgressResult<Rendered> {
        graph_steps(display, &self.detector, target)
    }

    /// Detector state
    pub fn detector(&self) -> &StepDetector<N> {
        &self.detector
    }

    /// Mutable access for the runtime setters
    pub fn detector_mut(&mut self) -> &mut StepDetector<N> {
        &mut self.detector
    }

    /// Acceleration source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable acceleration source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Time source
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Take the parts back
    pub fn into_parts(self) -> (S, T, StepDetector<N>) {
        (self.source, self.clock, self.detector)
    }
}

/// Draw a detector's step count as progress toward `target`
pub fn graph_steps<D: ProgressDisplay + ?Sized, const N: usize>(
    display: &mut D,
    detector: &StepDetector<N>,
    target: u32,
) -> ProgressResult<Rendered> {
    render_progress(display, detector.step_count() as i64, target)
}

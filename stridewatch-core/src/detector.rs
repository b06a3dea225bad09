//! Step Detector
//!
//! ## Overview
//!
//! `StepDetector` is the single owned aggregate holding all detector state:
//! both rolling windows, the smoothing filter, the threshold tracker and the
//! edge state machine. The host calls [`StepDetector::tick`] once per
//! sample interval; the detector owns neither the loop nor the delay.
//!
//! ## Tick Order
//!
//! The order below is part of the algorithm. Reordering any two steps
//! changes which samples a decision sees:
//!
//! ```text
//! 1. raw window      ← sample                 (evicts oldest raw)
//! 2. smoothed value  = smooth(raw window)
//! 3. smoothed window ← smoothed value          (evicts oldest smoothed)
//! 4. tracker.update(new, evicted, oldest remaining)
//! 5. edge.update(latest, previous, threshold, now)
//! 6. stale-motion reset if no edge for > timeout
//! ```
//!
//! Every step is O(k) or O(1); no allocation, no panics.
//!
//! ## Example
//!
//! ```rust
//! use stridewatch_core::{DetectorConfig, StepDetector};
//!
//! let mut detector: StepDetector = StepDetector::new(DetectorConfig::default(), 0);
//!
//! let mut now = 0;
//! for strength in [1024.0, 1300.0, 1500.0, 1200.0, 900.0] {
//!     now += 50;
//!     let event = detector.tick(strength, now);
//!     if event.is_step() {
//!         // update a display, notify a companion app, ...
//!     }
//! }
//! assert_eq!(detector.step_count(), 0); // confidence gate not satisfied yet
//! ```

use crate::buffer::RollingWindow;
use crate::config::{clamp_multiplier, DetectorConfig};
use crate::constants::{DEFAULT_WINDOW_LEN, MAX_SENSITIVITY};
use crate::edge::{EdgeDetector, EdgePhase};
use crate::errors::ConfigResult;
use crate::events::StepEvent;
use crate::sample::{strength, AccelerationVector, Strength};
use crate::smoothing::TriangularSmoother;
use crate::telemetry::Telemetry;
use crate::threshold::{ThresholdState, ThresholdTracker};
use crate::time::Timestamp;

/// Adaptive-threshold step detector over an `N`-sample window
#[derive(Debug, Clone)]
pub struct StepDetector<const N: usize = { DEFAULT_WINDOW_LEN }> {
    config: DetectorConfig,
    raw: RollingWindow<N>,
    smoothed: RollingWindow<N>,
    smoother: TriangularSmoother,
    tracker: ThresholdTracker,
    edge: EdgeDetector,
    last_tick_ms: Timestamp,
}

impl<const N: usize> StepDetector<N> {
    /// Create a detector whose timers start at `now`
    ///
    /// Out-of-range fields are clamped (see [`DetectorConfig::sanitized`]).
    pub fn new(config: DetectorConfig, now: Timestamp) -> Self {
        let config = config.sanitized();
        let neutral = config.neutral_strength;

        Self {
            config,
            raw: RollingWindow::filled(neutral),
            smoothed: RollingWindow::filled(neutral),
            smoother: TriangularSmoother::new(config.smoothing_coefficient),
            tracker: ThresholdTracker::new(
                neutral,
                config.threshold_multiplier,
                config.trigger_offset(),
            ),
            edge: EdgeDetector::new(
                config.rise_gate,
                config.min_step_interval_ms,
                config.confidence_steps,
                config.stale_timeout_ms,
                now,
            ),
            last_tick_ms: now,
        }
    }

    /// Create a detector, rejecting an invalid config instead of clamping it
    pub fn try_new(config: DetectorConfig, now: Timestamp) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config, now))
    }

    /// Run one tick for a strength sampled at `now`
    pub fn tick(&mut self, sample: Strength, now: Timestamp) -> StepEvent {
        self.last_tick_ms = now;

        self.raw.push(sample);
        let smoothed = self.smoother.smooth(&self.raw);
        let evicted = self.smoothed.push(smoothed);

        let threshold = self
            .tracker
            .update(smoothed, evicted, self.smoothed.oldest());

        let outcome = self.edge.update(
            self.smoothed.latest(),
            self.smoothed.previous(),
            &threshold,
            now,
        );

        let stale_reset = self.edge.expire_stale(now);
        if stale_reset {
            self.tracker.reset();
            log_debug!(
                "No step for over {} ms, threshold reset at {} ms",
                self.config.stale_timeout_ms,
                now
            );
        }

        StepEvent {
            timestamp: now,
            raw: sample,
            smoothed,
            threshold: threshold.threshold,
            outcome,
            credited: outcome.credited(),
            step_count: self.edge.step_count(),
            stale_reset,
        }
    }

    /// Run one tick for a raw 3-axis reading, using the configured strength mode
    pub fn tick_vector(&mut self, vector: AccelerationVector, now: Timestamp) -> StepEvent {
        let sample = strength(self.config.strength_mode, vector);
        self.tick(sample, now)
    }

    // ===== ACCESSORS =====

    /// Steps credited since creation
    pub fn step_count(&self) -> u32 {
        self.edge.step_count()
    }

    /// Current trigger threshold
    pub fn threshold(&self) -> Strength {
        self.tracker.state().threshold
    }

    /// Running peak of the smoothed signal
    pub fn peak(&self) -> Strength {
        self.tracker.state().peak
    }

    /// Running trough of the smoothed signal
    pub fn trough(&self) -> Strength {
        self.tracker.state().trough
    }

    /// `peak − trough`
    pub fn amplitude(&self) -> Strength {
        self.tracker.state().amplitude
    }

    /// Peak, trough, amplitude and threshold together
    pub fn threshold_state(&self) -> ThresholdState {
        self.tracker.state()
    }

    /// Most recent raw strength
    pub fn latest_raw(&self) -> Strength {
        self.raw.latest()
    }

    /// Most recent smoothed strength
    pub fn latest_smoothed(&self) -> Strength {
        self.smoothed.latest()
    }

    /// Tick period the host is expected to keep
    pub fn sample_interval_ms(&self) -> u32 {
        self.config.sample_interval_ms
    }

    /// Time span covered by the rolling windows at the configured rate
    pub fn window_duration_ms(&self) -> u64 {
        N as u64 * self.config.sample_interval_ms as u64
    }

    /// Edge detector phase
    pub fn phase(&self) -> EdgePhase {
        self.edge.phase()
    }

    /// Edges accumulated by the confidence gate
    pub fn confidence_count(&self) -> u8 {
        self.edge.confidence().confirmed()
    }

    /// Timestamp of the last confirmed step (or of the last reset)
    pub fn last_step_ms(&self) -> Timestamp {
        self.edge.last_step_ms()
    }

    /// Milliseconds between the last confirmed step and the latest tick
    pub fn since_last_step_ms(&self) -> u64 {
        self.edge.since_last_step_ms()
    }

    /// Effective configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Recent raw strengths, oldest first
    pub fn raw_window(&self) -> &RollingWindow<N> {
        &self.raw
    }

    /// Recent smoothed strengths, oldest first
    pub fn smoothed_window(&self) -> &RollingWindow<N> {
        &self.smoothed
    }

    /// Snapshot of the detector after the latest tick
    pub fn telemetry(&self) -> Telemetry {
        let state = self.tracker.state();
        Telemetry {
            timestamp: self.last_tick_ms,
            raw: self.raw.latest(),
            smoothed: self.smoothed.latest(),
            peak: state.peak,
            trough: state.trough,
            threshold: state.threshold,
            phase: self.edge.phase(),
            confidence: self.edge.confidence().confirmed(),
            step_count: self.edge.step_count(),
        }
    }

    // ===== MUTATORS =====

    /// Set sensitivity on the 0–100 scale; larger values lower the threshold
    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        if sensitivity > MAX_SENSITIVITY {
            log_warn!("Sensitivity {} clamped to {}", sensitivity, MAX_SENSITIVITY);
        }
        self.config.sensitivity = sensitivity.min(MAX_SENSITIVITY);
        self.tracker.set_trigger_offset(self.config.trigger_offset());
    }

    /// Set the minimum time between two credited steps
    pub fn set_min_step_interval(&mut self, ms: u32) {
        self.config.min_step_interval_ms = ms;
        self.edge.set_min_step_interval(ms);
    }

    /// Set the threshold multiplier, clamped to [0, 1]; NaN is ignored
    pub fn set_threshold_multiplier(&mut self, multiplier: f32) {
        let Some(clamped) = clamp_multiplier(multiplier) else {
            log_warn!("Ignoring NaN threshold multiplier");
            return;
        };
        if clamped != multiplier {
            log_warn!("Threshold multiplier {} clamped to {}", multiplier, clamped);
        }
        self.config.threshold_multiplier = clamped;
        self.tracker.set_multiplier(clamped);
    }
}

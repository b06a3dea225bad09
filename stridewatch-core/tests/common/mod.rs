//! Common test utilities for integration tests
//!
//! This module provides:
//! - Synthetic gait signal generators (triangle waves, ramps, jolts)
//! - A scripted accelerometer and a recording LED matrix
//! - A `Feeder` that drives a detector at a fixed sample interval

#![allow(dead_code)]

use stridewatch_core::{
    display::ProgressDisplay,
    sample::{AccelerationSource, AccelerationVector, Axis},
    time::Timestamp,
    StepDetector, StepEvent,
};

/// Default test sample interval (20 Hz)
pub const INTERVAL_MS: u64 = 50;

/// Resting magnitude of a still device
pub const BASELINE: f32 = 1024.0;

/// One step period of a triangle wave around `baseline`
///
/// `ticks` samples, rising for the first quarter, falling through the
/// middle half and rising again in the last quarter, so consecutive periods
/// join without a discontinuity. `ticks` must be a multiple of 4.
pub fn triangle_period(baseline: f32, amplitude: f32, ticks: usize) -> Vec<f32> {
    let quarter = ticks / 4;
    let step = amplitude / quarter as f32;

    (0..ticks)
        .map(|i| {
            let offset = if i <= quarter {
                i as f32 * step
            } else if i <= 3 * quarter {
                amplitude - (i - quarter) as f32 * step
            } else {
                -amplitude + (i - 3 * quarter) as f32 * step
            };
            baseline + offset
        })
        .collect()
}

/// `cycles` back-to-back triangle periods
pub fn walking_signal(baseline: f32, amplitude: f32, ticks_per_step: usize, cycles: usize) -> Vec<f32> {
    let period = triangle_period(baseline, amplitude, ticks_per_step);
    period.iter().copied().cycle().take(period.len() * cycles).collect()
}

/// Linear ramp from `low` to `high` over `up` ticks, then back over `down`
///
/// The starting value itself is not included, so cycles can be chained.
pub fn ramp_cycle(low: f32, high: f32, up: usize, down: usize) -> Vec<f32> {
    let rise = (high - low) / up as f32;
    let fall = (high - low) / down as f32;

    let mut values: Vec<f32> = (1..=up).map(|i| low + rise * i as f32).collect();
    values.extend((1..=down).map(|i| high - fall * i as f32));
    values
}

/// Flat signal at `level` for `ticks` samples
pub fn flat(level: f32, ticks: usize) -> Vec<f32> {
    vec![level; ticks]
}

/// Drives a detector at a fixed interval and records every event
pub struct Feeder<const N: usize> {
    pub detector: StepDetector<N>,
    pub now: Timestamp,
    pub events: Vec<StepEvent>,
}

impl<const N: usize> Feeder<N> {
    pub fn new(detector: StepDetector<N>) -> Self {
        Self {
            detector,
            now: 0,
            events: Vec::new(),
        }
    }

    /// Tick once per value, advancing the clock by `INTERVAL_MS` first
    pub fn feed(&mut self, values: &[f32]) -> u32 {
        let mut credited = 0;
        for &value in values {
            self.now += INTERVAL_MS;
            let event = self.detector.tick(value, self.now);
            credited += event.credited;
            self.events.push(event);
        }
        credited
    }

    /// First event in the log with a stale reset
    pub fn first_reset(&self) -> Option<&StepEvent> {
        self.events.iter().find(|e| e.stale_reset)
    }
}

/// Accelerometer replaying a fixed list of vectors, holding the last one
pub struct ScriptedSource {
    vectors: Vec<AccelerationVector>,
    index: usize,
    current: AccelerationVector,
}

impl ScriptedSource {
    pub fn new(vectors: Vec<AccelerationVector>) -> Self {
        Self {
            vectors,
            index: 0,
            current: AccelerationVector::default(),
        }
    }

    /// Vertical-only vectors whose magnitude follows `strengths`
    pub fn from_strengths(strengths: &[f32]) -> Self {
        Self::new(
            strengths
                .iter()
                .map(|&s| AccelerationVector::new(0, 0, -(s as i32)))
                .collect(),
        )
    }

    pub fn remaining(&self) -> usize {
        self.vectors.len().saturating_sub(self.index)
    }
}

impl AccelerationSource for ScriptedSource {
    fn acceleration(&mut self, axis: Axis) -> i32 {
        // A new vector is latched on every X read; Y and Z reuse it
        if axis == Axis::X {
            if let Some(&next) = self.vectors.get(self.index) {
                self.current = next;
                self.index += 1;
            }
        }
        self.current.axis(axis)
    }
}

/// LED matrix that records every call
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingDisplay {
    pub clears: u32,
    pub pauses: Vec<u32>,
    pub plots: Vec<(i32, i32)>,
}

impl ProgressDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.plots.clear();
    }

    fn pause(&mut self, ms: u32) {
        self.pauses.push(ms);
    }

    fn plot(&mut self, x: i32, y: i32) {
        self.plots.push((x, y));
    }
}

//! Adaptive Threshold Tracker
//!
//! ## Overview
//!
//! A fixed threshold cannot work for a pedometer: the same gait produces a
//! 300 mg swing with the device in a hand and a 1500 mg swing with it on an
//! ankle. The tracker follows the running peak and trough of the smoothed
//! signal and places the threshold a fixed fraction of the way up:
//!
//! ```text
//! amplitude = peak − trough
//! threshold = trough + round(amplitude × multiplier) + trigger_offset
//! ```
//!
//! `trigger_offset` is `100 − sensitivity` milli-g; at the default full
//! sensitivity it is zero.
//!
//! ## Relaxed Extremes
//!
//! Peak and trough are *not* an exact min/max of the window at every
//! instant; that would need a full rescan or a monotonic deque per tick.
//! Instead, only the boundary case is handled: when the value leaving the
//! window was at (or beyond) the current extreme, the extreme is re-derived
//! from the two values that are cheap to reach, the new oldest value and
//! the new sample. This lets a stale extreme age out in O(1) at the cost of
//! occasionally tightening the range more than a true min/max would.
//!
//! ## Startup
//!
//! Peak and trough start at the neutral strength, so the amplitude is zero
//! and the excursion test in the edge detector cannot pass until the window
//! has seen real variation.

use crate::sample::Strength;

/// Peak, trough and derived threshold of the smoothed signal
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdState {
    /// Running maximum
    pub peak: Strength,
    /// Running minimum
    pub trough: Strength,
    /// `peak − trough`
    pub amplitude: Strength,
    /// Level a rise must cross
    pub threshold: Strength,
}

impl ThresholdState {
    /// Flat state centered on `neutral`
    pub fn neutral(neutral: Strength, trigger_offset: Strength) -> Self {
        Self {
            peak: neutral,
            trough: neutral,
            amplitude: 0.0,
            threshold: neutral + trigger_offset,
        }
    }

    /// Whether the tracked swing reaches above the threshold
    pub fn has_excursion(&self) -> bool {
        self.amplitude + self.trough > self.threshold
    }
}

/// Running peak/trough tracker producing the step threshold
#[derive(Debug, Clone)]
pub struct ThresholdTracker {
    state: ThresholdState,
    neutral: Strength,
    multiplier: f32,
    trigger_offset: Strength,
}

impl ThresholdTracker {
    /// Tracker at rest on `neutral`
    pub fn new(neutral: Strength, multiplier: f32, trigger_offset: Strength) -> Self {
        Self {
            state: ThresholdState::neutral(neutral, trigger_offset),
            neutral,
            multiplier,
            trigger_offset,
        }
    }

    /// Fold one smoothed sample into the tracker
    ///
    /// - `new_value`: the smoothed sample just pushed
    /// - `evicted`: the smoothed sample that left the window on that push
    /// - `oldest_remaining`: the window's oldest value after the push
    pub fn update(
        &mut self,
        new_value: Strength,
        evicted: Strength,
        oldest_remaining: Strength,
    ) -> ThresholdState {
        let state = &mut self.state;

        if new_value > state.peak {
            state.peak = new_value;
        }
        if new_value < state.trough {
            state.trough = new_value;
        }

        // A former extreme just left the window
        if evicted <= state.trough {
            state.trough = oldest_remaining.min(new_value);
        }
        if evicted >= state.peak {
            state.peak = oldest_remaining.max(new_value);
        }

        self.recompute();
        self.state
    }

    /// Return to the neutral flat state
    pub fn reset(&mut self) {
        self.state = ThresholdState::neutral(self.neutral, self.trigger_offset);
    }

    /// Current state
    pub fn state(&self) -> ThresholdState {
        self.state
    }

    /// Fraction of the swing added to the trough
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Sensitivity offset in milli-g
    pub fn trigger_offset(&self) -> Strength {
        self.trigger_offset
    }

    /// Strength peak and trough reset to
    pub fn neutral(&self) -> Strength {
        self.neutral
    }

    /// Change the multiplier; the threshold follows immediately
    pub fn set_multiplier(&mut self, multiplier: f32) {
        self.multiplier = multiplier;
        self.recompute();
    }

    /// Change the trigger offset; the threshold follows immediately
    pub fn set_trigger_offset(&mut self, trigger_offset: Strength) {
        self.trigger_offset = trigger_offset;
        self.recompute();
    }

    fn recompute(&mut self) {
        let state = &mut self.state;
        state.amplitude = state.peak - state.trough;
        state.threshold =
            state.trough + libm::roundf(state.amplitude * self.multiplier) + self.trigger_offset;
    }
}

//! Detector configuration
//!
//! Every tunable of the detector in one `Copy` struct. Defaults come from
//! [`constants`](crate::constants); presets cover the common placements.
//!
//! ```rust
//! use stridewatch_core::config::DetectorConfig;
//! use stridewatch_core::sample::StrengthMode;
//!
//! // Wrist-worn device that keeps its orientation: cheaper signed sum
//! let config = DetectorConfig::default()
//!     .with_strength_mode(StrengthMode::SignedSum)
//!     .with_min_step_interval(400);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! Validation is only needed for configs that come from outside (a file,
//! a radio link). Runtime setters on the detector clamp instead of failing.

use crate::constants::{
    DEFAULT_CONFIDENCE_STEPS, DEFAULT_MIN_STEP_INTERVAL_MS, DEFAULT_SAMPLE_INTERVAL_MS,
    DEFAULT_SENSITIVITY, DEFAULT_SMOOTHING_COEFFICIENT, DEFAULT_THRESHOLD_MULTIPLIER,
    MAX_SENSITIVITY, NEUTRAL_STRENGTH_MG, STALE_MOTION_TIMEOUT_MS,
};
use crate::edge::RiseGate;
use crate::errors::{ConfigError, ConfigResult};
use crate::sample::{Strength, StrengthMode};

/// Step detector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// How a 3-axis reading becomes a strength
    pub strength_mode: StrengthMode,

    /// Whether a rise must start above the threshold
    pub rise_gate: RiseGate,

    /// Triangular smoothing length `k`
    pub smoothing_coefficient: usize,

    /// Fraction of the amplitude above the trough where the threshold sits
    pub threshold_multiplier: f32,

    /// 0–100; the threshold is raised by `100 − sensitivity` milli-g
    pub sensitivity: u8,

    /// Minimum time between two credited steps
    pub min_step_interval_ms: u32,

    /// Consecutive edges required before steps are credited
    pub confidence_steps: u8,

    /// Time without an edge after which adaptive state is discarded
    pub stale_timeout_ms: u32,

    /// Interval the host waits between ticks
    pub sample_interval_ms: u32,

    /// Value the windows are filled with and peak/trough reset to
    pub neutral_strength: Strength,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            strength_mode: StrengthMode::Magnitude,
            rise_gate: RiseGate::AboveThreshold,
            smoothing_coefficient: DEFAULT_SMOOTHING_COEFFICIENT,
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            sensitivity: DEFAULT_SENSITIVITY,
            min_step_interval_ms: DEFAULT_MIN_STEP_INTERVAL_MS,
            confidence_steps: DEFAULT_CONFIDENCE_STEPS,
            stale_timeout_ms: STALE_MOTION_TIMEOUT_MS,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            neutral_strength: NEUTRAL_STRENGTH_MG,
        }
    }
}

impl DetectorConfig {
    /// Default tuning for walking with the device in a hand or pocket
    pub fn walking() -> Self {
        Self::default()
    }

    /// Running: faster cadence, bigger swings
    pub fn running() -> Self {
        Self {
            min_step_interval_ms: 250,
            threshold_multiplier: 0.5,
            ..Self::default()
        }
    }

    /// Light-footed or slow walkers: lower threshold, shorter gate
    pub fn sensitive() -> Self {
        Self {
            threshold_multiplier: 0.45,
            confidence_steps: 2,
            ..Self::default()
        }
    }

    /// Device strapped flat (e.g. a shoe clip), orientation fixed
    pub fn fixed_orientation() -> Self {
        Self {
            strength_mode: StrengthMode::SignedSum,
            neutral_strength: StrengthMode::SignedSum.resting_strength(),
            ..Self::default()
        }
    }

    /// Use `mode` to reduce the three axes to one strength
    pub fn with_strength_mode(mut self, mode: StrengthMode) -> Self {
        self.strength_mode = mode;
        self
    }

    /// Set the condition for starting a rise
    pub fn with_rise_gate(mut self, gate: RiseGate) -> Self {
        self.rise_gate = gate;
        self
    }

    /// Set the triangular smoothing length
    pub fn with_smoothing(mut self, coefficient: usize) -> Self {
        self.smoothing_coefficient = coefficient;
        self
    }

    /// Set the fraction of the swing added to the trough
    pub fn with_threshold_multiplier(mut self, multiplier: f32) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    /// Set sensitivity (0-100, higher lowers the threshold)
    pub fn with_sensitivity(mut self, sensitivity: u8) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set the debounce window between credited edges
    pub fn with_min_step_interval(mut self, ms: u32) -> Self {
        self.min_step_interval_ms = ms;
        self
    }

    /// Set the edges needed before counting starts
    pub fn with_confidence_steps(mut self, steps: u8) -> Self {
        self.confidence_steps = steps;
        self
    }

    /// Set the idle time after which the detector resets
    pub fn with_stale_timeout(mut self, ms: u32) -> Self {
        self.stale_timeout_ms = ms;
        self
    }

    /// Set the host tick period
    pub fn with_sample_interval(mut self, ms: u32) -> Self {
        self.sample_interval_ms = ms;
        self
    }

    /// Set the at-rest strength peak and trough reset to
    pub fn with_neutral_strength(mut self, neutral: Strength) -> Self {
        self.neutral_strength = neutral;
        self
    }

    /// Milli-g added to the threshold for the configured sensitivity
    pub fn trigger_offset(&self) -> Strength {
        (MAX_SENSITIVITY - self.sensitivity.min(MAX_SENSITIVITY)) as Strength
    }

    /// Check that every field keeps the algorithm well-defined
    pub fn validate(&self) -> ConfigResult<()> {
        if self.smoothing_coefficient == 0 {
            return Err(ConfigError::ZeroSmoothing);
        }

        if self.confidence_steps == 0 {
            return Err(ConfigError::ZeroConfidence);
        }

        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }

        if !(0.0..=1.0).contains(&self.threshold_multiplier) {
            // Also catches NaN, which is never contained in a range
            return Err(ConfigError::InvalidMultiplier {
                multiplier: self.threshold_multiplier,
            });
        }

        if !self.neutral_strength.is_finite() {
            return Err(ConfigError::InvalidNeutral {
                reason: "neutral strength must be finite",
            });
        }

        Ok(())
    }

    /// Copy of this config with out-of-range values pulled into range
    pub fn sanitized(&self) -> Self {
        let mut config = *self;

        config.smoothing_coefficient = config.smoothing_coefficient.max(1);
        config.confidence_steps = config.confidence_steps.max(1);
        config.sample_interval_ms = config.sample_interval_ms.max(1);
        config.sensitivity = config.sensitivity.min(MAX_SENSITIVITY);
        config.threshold_multiplier = clamp_multiplier(config.threshold_multiplier)
            .unwrap_or(DEFAULT_THRESHOLD_MULTIPLIER);
        if !config.neutral_strength.is_finite() {
            config.neutral_strength = NEUTRAL_STRENGTH_MG;
        }

        config
    }
}

/// Clamp a multiplier into [0, 1]; `None` for NaN
pub(crate) fn clamp_multiplier(multiplier: f32) -> Option<f32> {
    if multiplier.is_nan() {
        None
    } else {
        Some(multiplier.clamp(0.0, 1.0))
    }
}

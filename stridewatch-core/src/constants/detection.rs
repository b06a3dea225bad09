//! Step Detection Parameters
//!
//! Values are expressed in the accelerometer's native unit, milli-g
//! (1000 mg ≈ 9.81 m/s²), which is what micro:bit-class sensors report.

// ===== SIGNAL BASELINE =====

/// Neutral acceleration strength (milli-g).
///
/// A device lying still reads roughly 1 g in magnitude mode. Both rolling
/// windows are pre-filled with this value and peak/trough return to it on a
/// stale-motion reset, so the first real samples are compared against a
/// resting baseline instead of zero.
pub const NEUTRAL_STRENGTH_MG: f32 = 1024.0;

// ===== SMOOTHING =====

/// Default smoothing coefficient `k` for the triangular moving average.
///
/// Three samples at 20 Hz span 150 ms: enough to reject single-sample
/// jitter while keeping the lag well under one step period.
pub const DEFAULT_SMOOTHING_COEFFICIENT: usize = 3;

// ===== ADAPTIVE THRESHOLD =====

/// Fraction of the observed amplitude above the trough at which a swing
/// counts as a step.
pub const DEFAULT_THRESHOLD_MULTIPLIER: f32 = 0.58;

/// Upper bound of the sensitivity scale.
///
/// The trigger offset added to the threshold is `MAX_SENSITIVITY - sensitivity`
/// milli-g, so full sensitivity adds nothing.
pub const MAX_SENSITIVITY: u8 = 100;

/// Default sensitivity (full sensitivity, zero trigger offset).
pub const DEFAULT_SENSITIVITY: u8 = MAX_SENSITIVITY;

// ===== CONFIDENCE GATE =====

/// Consecutive qualifying edges required before any step is credited.
///
/// Door slams and bumps rarely produce more than two clean edges in a row;
/// a walking cadence produces them continuously.
pub const DEFAULT_CONFIDENCE_STEPS: u8 = 3;

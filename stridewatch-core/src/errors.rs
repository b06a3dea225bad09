//! Error Types for Configuration and Display Mapping
//!
//! ## Where Errors Can Happen
//!
//! The tick path itself has no failure mode: every input is a plain scalar
//! and every buffer access is in bounds by construction, so the detector
//! always produces a (possibly wrong) step count rather than an error.
//! Errors only exist at the edges:
//!
//! - **Configuration**: a config that would make the algorithm ill-defined
//!   (zero smoothing window, zero sample interval, NaN multiplier) is
//!   rejected by [`DetectorConfig::validate`](crate::config::DetectorConfig::validate).
//! - **Display mapping**: a progress target of zero has no meaningful
//!   scale.
//!
//! ## Embedded Constraints
//!
//! Both enums are `Copy`, carry no heap data and only use `&'static str`
//! for messages, so they can be returned from hot paths and stored freely.
//!
//! ```rust
//! use stridewatch_core::{ConfigError, DetectorConfig};
//!
//! let mut config = DetectorConfig::default();
//! config.smoothing_coefficient = 0;
//!
//! match config.validate() {
//!     Err(ConfigError::ZeroSmoothing) => { /* fall back to defaults */ }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for progress mapping
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Configuration rejected by [`DetectorConfig::validate`](crate::config::DetectorConfig::validate)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Smoothing coefficient of zero leaves the filter without any sample
    #[error("Smoothing coefficient must be at least 1")]
    ZeroSmoothing,

    /// Confidence gate that never opens
    #[error("Confidence gate must require at least 1 edge")]
    ZeroConfidence,

    /// Sample interval of zero makes every time-based rule meaningless
    #[error("Sample interval must be at least 1 ms")]
    ZeroSampleInterval,

    /// Threshold multiplier is NaN, infinite or outside [0, 1]
    #[error("Threshold multiplier {multiplier} outside [0, 1]")]
    InvalidMultiplier {
        /// The rejected multiplier
        multiplier: f32,
    },

    /// Neutral strength is not a finite number
    #[error("Invalid neutral strength: {reason}")]
    InvalidNeutral {
        /// Why the value was rejected
        reason: &'static str,
    },
}

/// Progress mapping failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressError {
    /// Target of zero has no scale to map onto
    #[error("Progress target must be positive")]
    ZeroTarget,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroSmoothing =>
                defmt::write!(fmt, "Smoothing coefficient is 0"),
            Self::ZeroConfidence =>
                defmt::write!(fmt, "Confidence gate requires 0 edges"),
            Self::ZeroSampleInterval =>
                defmt::write!(fmt, "Sample interval is 0 ms"),
            Self::InvalidMultiplier { multiplier } =>
                defmt::write!(fmt, "Multiplier {} outside [0, 1]", multiplier),
            Self::InvalidNeutral { reason } =>
                defmt::write!(fmt, "Neutral strength: {}", reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProgressError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroTarget => defmt::write!(fmt, "Progress target is 0"),
        }
    }
}

//! Constants for Stridewatch Core
//!
//! Every tuning value the detector uses lives here, with the unit in the
//! name and a note on where the number comes from. `DetectorConfig::default()`
//! is assembled from these, so changing a default means changing it here.
//!
//! ## Organization
//!
//! - **Detection**: smoothing, threshold and confidence-gate parameters
//! - **Timing**: sample interval, debounce and stale-motion timeouts
//! - **Display**: LED matrix geometry and progress mapping

/// Step detection parameters (smoothing, threshold, confidence gate).
pub mod detection;

/// Sampling intervals, window sizing and motion timeouts.
pub mod timing;

/// LED matrix geometry and progress-bar mapping.
pub mod display;

pub use detection::{
    DEFAULT_CONFIDENCE_STEPS, DEFAULT_SENSITIVITY, DEFAULT_SMOOTHING_COEFFICIENT,
    DEFAULT_THRESHOLD_MULTIPLIER, MAX_SENSITIVITY, NEUTRAL_STRENGTH_MG,
};

pub use timing::{
    DEFAULT_MIN_STEP_INTERVAL_MS, DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_WINDOW_LEN,
    STALE_MOTION_TIMEOUT_MS, WINDOW_DURATION_MS,
};

pub use display::{MATRIX_CELLS, MATRIX_SIDE, PROGRESS_PAUSE_MS};

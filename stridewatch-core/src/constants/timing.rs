//! Timing Constants
//!
//! Sampling cadence, window sizing and the two time-based rules of the
//! detector (debounce and stale-motion reset). All values in milliseconds.

/// Default interval between two samples (milliseconds).
///
/// 20 Hz comfortably resolves walking (1.5–2.5 steps/s) and running
/// (up to ~4 steps/s) while keeping the tick budget tiny.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 50;

/// Time span covered by the rolling windows (milliseconds).
pub const WINDOW_DURATION_MS: u32 = 2000;

/// Default rolling window length in samples.
///
/// `WINDOW_DURATION_MS / DEFAULT_SAMPLE_INTERVAL_MS` = 40 samples.
pub const DEFAULT_WINDOW_LEN: usize = (WINDOW_DURATION_MS / DEFAULT_SAMPLE_INTERVAL_MS) as usize;

/// Minimum time between two credited steps (milliseconds).
///
/// 500 ms caps the detector at two steps per second, which rejects the
/// double peak a single heel strike often produces.
pub const DEFAULT_MIN_STEP_INTERVAL_MS: u32 = 500;

/// Time without a qualifying edge after which adaptive state is discarded
/// (milliseconds).
pub const STALE_MOTION_TIMEOUT_MS: u32 = 2000;

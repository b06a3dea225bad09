//! Core step detector for Stridewatch
//!
//! Counts walking steps from a periodically sampled 3-axis accelerometer.
//! Designed to run forever on small devices at a fixed sample rate.
//!
//! Key constraints:
//! - No heap allocation, fixed memory chosen at compile time
//! - O(k) work per tick, independent of the window length
//! - Only simple float arithmetic (`sqrtf`, `roundf` via `libm`)
//!
//! Per tick: sample → raw window → triangular smoothing → smoothed window
//! → adaptive peak/trough threshold → rise/fall edge detection with
//! debounce and a confidence gate → stale-motion reset.
//!
//! ```no_run
//! use stridewatch_core::{DetectorConfig, StepDetector};
//! use stridewatch_core::sample::AccelerationVector;
//!
//! let mut detector: StepDetector = StepDetector::new(DetectorConfig::default(), 0);
//!
//! // Called by the host every `sample_interval_ms`
//! let event = detector.tick_vector(AccelerationVector::new(12, -40, -1010), 50);
//! if event.is_step() {
//!     // refresh the display
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod counter;
pub mod detector;
pub mod display;
pub mod edge;
pub mod errors;
pub mod events;
pub mod sample;
pub mod smoothing;
pub mod telemetry;
pub mod threshold;
pub mod time;

// Public API
pub use config::DetectorConfig;
pub use counter::StepCounter;
pub use detector::StepDetector;
pub use display::{map_to_25, render_progress, ProgressDisplay};
pub use edge::{EdgeOutcome, EdgePhase, RiseGate};
pub use errors::{ConfigError, ConfigResult, ProgressError, ProgressResult};
pub use events::StepEvent;
pub use sample::{AccelerationSource, AccelerationVector, Axis, Strength, StrengthMode};
pub use telemetry::{Telemetry, TelemetryLog};
pub use time::{TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}

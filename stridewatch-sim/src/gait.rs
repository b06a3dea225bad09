//! Synthetic Walking Accelerometer
//!
//! Produces the 3-axis readings a wrist or pocket device would see while
//! walking: 1 g of gravity plus a periodic swing per stride, sensor noise,
//! optional standing pauses and isolated jolts (a bump, a dropped bag).
//!
//! ## Signal Model
//!
//! ```text
//! strength(t) = baseline + amplitude × tri(t / cadence) + jolt(t) + noise
//! ```
//!
//! `tri` is a unit triangle wave starting at zero and rising. During a
//! pause the swing is zero. The strength is then split into a vector tilted
//! by `tilt_deg` around the Y axis, so the magnitude is preserved while
//! the individual axes are not trivially zero.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use stridewatch_core::constants::NEUTRAL_STRENGTH_MG;
use stridewatch_core::sample::{AccelerationSource, AccelerationVector, Axis};
use stridewatch_core::time::{TimeSource, Timestamp};

use crate::clock::SimClock;

/// How long a jolt lasts
const JOLT_DURATION_MS: u64 = 150;

/// Standing still between `start_ms` and `start_ms + duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pause {
    pub start_ms: Timestamp,
    pub duration_ms: u64,
}

impl Pause {
    pub fn contains(&self, t: Timestamp) -> bool {
        t >= self.start_ms && t - self.start_ms < self.duration_ms
    }
}

/// Parameters of the synthetic gait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Time per stride
    pub cadence_ms: u32,
    /// Peak swing around the baseline (milli-g)
    pub amplitude_mg: f32,
    /// Standard deviation of the Gaussian sensor noise (milli-g)
    pub noise_mg: f32,
    /// Resting magnitude (milli-g)
    pub baseline_mg: f32,
    /// Device tilt around Y
    pub tilt_deg: f32,
    /// Size of each jolt (milli-g)
    pub jolt_mg: f32,
    /// Start times of isolated jolts
    pub jolts: Vec<Timestamp>,
    pub pauses: Vec<Pause>,
    /// Noise seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            cadence_ms: 600,
            amplitude_mg: 450.0,
            noise_mg: 15.0,
            baseline_mg: NEUTRAL_STRENGTH_MG,
            tilt_deg: 20.0,
            jolt_mg: 700.0,
            jolts: Vec::new(),
            pauses: Vec::new(),
            seed: None,
        }
    }
}

impl GaitConfig {
    /// Whether the wearer is walking at `t`
    pub fn is_walking(&self, t: Timestamp) -> bool {
        self.cadence_ms > 0 && !self.pauses.iter().any(|p| p.contains(t))
    }

    /// Strides started in `[0, until)`, not counting pauses
    pub fn expected_strides(&self, until: Timestamp, interval_ms: u32) -> u64 {
        if self.cadence_ms == 0 || interval_ms == 0 {
            return 0;
        }
        let walking_ms = (0..until)
            .step_by(interval_ms as usize)
            .filter(|&t| self.is_walking(t))
            .count() as u64
            * interval_ms as u64;
        walking_ms / self.cadence_ms as u64
    }

    /// Noise-free strength at `t`
    pub fn clean_strength(&self, t: Timestamp) -> f32 {
        let mut value = self.baseline_mg;

        if self.is_walking(t) {
            let phase = (t % self.cadence_ms as u64) as f32 / self.cadence_ms as f32;
            value += self.amplitude_mg * triangle(phase);
        }

        if self
            .jolts
            .iter()
            .any(|&start| t >= start && t - start < JOLT_DURATION_MS)
        {
            value += self.jolt_mg;
        }

        value
    }
}

/// Unit triangle wave: 0 → 1 → −1 → 0 over one period
fn triangle(phase: f32) -> f32 {
    if phase < 0.25 {
        phase * 4.0
    } else if phase < 0.75 {
        2.0 - phase * 4.0
    } else {
        phase * 4.0 - 4.0
    }
}

/// Gaussian sample with unit variance (Box-Muller)
fn gaussian<R: Rng>(rng: &mut R) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Accelerometer driver replaying the synthetic gait
///
/// A new vector is generated on every X read (the detector reads X, Y, Z
/// in that order once per tick); Y and Z return components of the same
/// vector.
pub struct GaitSource {
    config: GaitConfig,
    clock: SimClock,
    rng: StdRng,
    current: AccelerationVector,
    readings: u64,
}

impl GaitSource {
    pub fn new(config: GaitConfig, clock: SimClock) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            clock,
            rng,
            current: AccelerationVector::default(),
            readings: 0,
        }
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    /// Vectors generated so far
    pub fn readings(&self) -> u64 {
        self.readings
    }

    /// Generate the reading for the clock's current time
    pub fn next_vector(&mut self) -> AccelerationVector {
        let t = self.clock.now();
        let mut strength = self.config.clean_strength(t);
        if self.config.noise_mg > 0.0 {
            strength += gaussian(&mut self.rng) * self.config.noise_mg;
        }

        let tilt = self.config.tilt_deg.to_radians();
        self.readings += 1;
        AccelerationVector::new(
            (strength * tilt.sin()).round() as i32,
            0,
            -(strength * tilt.cos()).round() as i32,
        )
    }
}

impl AccelerationSource for GaitSource {
    fn acceleration(&mut self, axis: Axis) -> i32 {
        if axis == Axis::X {
            self.current = self.next_vector();
        }
        self.current.axis(axis)
    }
}

//! Sample Source Adapter
//!
//! Collapses one 3-axis accelerometer reading into a single scalar
//! "strength" per tick. Two formulas are supported and the choice is made
//! once, in [`DetectorConfig`](crate::config::DetectorConfig):
//!
//! | Mode        | Formula           | Orientation | Cost        |
//! |-------------|-------------------|-------------|-------------|
//! | `Magnitude` | √(x² + y² + z²)   | agnostic    | one `sqrtf` |
//! | `SignedSum` | x + y + z         | must stay roughly fixed | adds only |
//!
//! The two are not interchangeable: a signed sum of a device rotated by 90°
//! has a completely different baseline, while the magnitude does not move.

use crate::constants::NEUTRAL_STRENGTH_MG;

/// Scalar acceleration strength of one tick (milli-g)
pub type Strength = f32;

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Lateral
    X,
    /// Longitudinal
    Y,
    /// Vertical
    Z,
}

/// Sensor driver seam
///
/// Called once per axis per tick. Drivers that cannot produce a fresh value
/// return their last reading; there is no error channel.
pub trait AccelerationSource {
    /// Signed acceleration along `axis` in milli-g
    fn acceleration(&mut self, axis: Axis) -> i32;
}

impl<S: AccelerationSource + ?Sized> AccelerationSource for &mut S {
    fn acceleration(&mut self, axis: Axis) -> i32 {
        (**self).acceleration(axis)
    }
}

/// How a 3-axis reading becomes a strength value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrengthMode {
    /// Euclidean norm, rotation-agnostic
    #[default]
    Magnitude,
    /// Plain sum of the three axes, sign-sensitive
    SignedSum,
}

impl StrengthMode {
    /// Resting strength of a device lying flat under this mode
    pub fn resting_strength(&self) -> Strength {
        match self {
            StrengthMode::Magnitude => NEUTRAL_STRENGTH_MG,
            // Flat and face up the whole 1 g sits on Z with a negative sign
            StrengthMode::SignedSum => -NEUTRAL_STRENGTH_MG,
        }
    }
}

/// One raw 3-axis reading in milli-g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelerationVector {
    /// X axis
    pub x: i32,
    /// Y axis
    pub y: i32,
    /// Z axis
    pub z: i32,
}

impl AccelerationVector {
    /// Vector from its three components
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Read all three axes from a source, X then Y then Z
    pub fn read_from<S: AccelerationSource + ?Sized>(source: &mut S) -> Self {
        Self {
            x: source.acceleration(Axis::X),
            y: source.acceleration(Axis::Y),
            z: source.acceleration(Axis::Z),
        }
    }

    /// Component along `axis`
    pub fn axis(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Collapse a vector to a strength using `mode`
pub fn strength(mode: StrengthMode, vector: AccelerationVector) -> Strength {
    let (x, y, z) = (vector.x as f32, vector.y as f32, vector.z as f32);
    match mode {
        StrengthMode::Magnitude => libm::sqrtf(x * x + y * y + z * z),
        StrengthMode::SignedSum => x + y + z,
    }
}

/// Read one vector from `source` and return its strength
pub fn sample<S: AccelerationSource + ?Sized>(mode: StrengthMode, source: &mut S) -> Strength {
    strength(mode, AccelerationVector::read_from(source))
}

//! Desktop host for the Stridewatch step detector
//!
//! Everything a device provides to the core, simulated on a PC:
//! - [`GaitSource`]: a walking accelerometer with noise, pauses and jolts
//! - [`SimClock`]: a millisecond clock shared by the sensor and the counter
//! - [`ConsoleMatrix`]: the 5×5 LED matrix, printed as text
//! - [`Simulation`]: the driving loop the core leaves to its host
//!
//! Runs are configured from JSON ([`SimConfig`]) and summarized as JSON
//! ([`Summary`]).

pub mod clock;
pub mod config;
pub mod gait;
pub mod matrix;
pub mod runner;

pub use clock::SimClock;
pub use config::SimConfig;
pub use gait::{GaitConfig, GaitSource, Pause};
pub use matrix::ConsoleMatrix;
pub use runner::{Simulation, Summary};

use rand::Rng;

/// Random step count in `1..=target` for exercising the display
///
/// A target of zero yields zero.
pub fn random_steps<R: Rng>(rng: &mut R, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    rng.gen_range(1..=target)
}

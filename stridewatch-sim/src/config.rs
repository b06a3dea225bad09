//! Simulation configuration file
//!
//! A single JSON document holding the detector tuning, the synthetic gait
//! and the run parameters. Every section is optional:
//!
//! ```json
//! {
//!   "detector": { "threshold_multiplier": 0.5, "rise_gate": "unconditional" },
//!   "gait": { "cadence_ms": 550, "pauses": [{ "start_ms": 10000, "duration_ms": 4000 }] },
//!   "target": 50,
//!   "duration_ms": 30000
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use stridewatch_core::DetectorConfig;

use crate::gait::GaitConfig;

/// Everything one simulation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub detector: DetectorConfig,
    pub gait: GaitConfig,
    /// Step goal shown on the matrix
    pub target: u32,
    /// Simulated run length
    pub duration_ms: u64,
    /// Redraw the matrix every this many milliseconds
    pub display_every_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            gait: GaitConfig::default(),
            target: 100,
            duration_ms: 60_000,
            display_every_ms: 5_000,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid simulation config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("cannot serialize simulation config")
    }

    pub fn validate(&self) -> Result<()> {
        self.detector
            .validate()
            .context("invalid detector section")?;

        if self.target == 0 {
            bail!("target must be at least one step");
        }
        if self.gait.cadence_ms != 0 && self.gait.cadence_ms < self.detector.sample_interval_ms {
            bail!(
                "cadence of {} ms is shorter than the {} ms sample interval",
                self.gait.cadence_ms,
                self.detector.sample_interval_ms
            );
        }
        if self.gait.noise_mg < 0.0 {
            bail!("noise must not be negative");
        }
        Ok(())
    }
}

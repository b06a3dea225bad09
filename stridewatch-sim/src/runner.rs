//! Driving loop
//!
//! The detector core does not own its loop; this is the host side of that
//! contract. Each iteration advances the simulated clock by one sample
//! interval, polls the counter once and, in real-time mode, sleeps for the
//! same interval.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use stridewatch_core::telemetry::{Calibration, TelemetryLog};
use stridewatch_core::time::TimeSource;
use stridewatch_core::{ProgressResult, StepCounter, StepEvent};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::gait::GaitSource;
use crate::matrix::ConsoleMatrix;

/// Snapshots kept for the calibration summary (last 10 s at 20 Hz)
pub const TELEMETRY_DEPTH: usize = 200;

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub duration_ms: u64,
    pub ticks: u64,
    pub steps: u32,
    /// Strides the gait generator actually produced
    pub expected_strides: u64,
    pub stale_resets: u32,
    pub calibration: Option<Calibration>,
}

impl Summary {
    /// Counted steps relative to generated strides
    pub fn accuracy(&self) -> Option<f64> {
        if self.expected_strides == 0 {
            return None;
        }
        Some(self.steps as f64 / self.expected_strides as f64)
    }
}

/// One configured simulation
pub struct Simulation {
    config: SimConfig,
    clock: SimClock,
    counter: StepCounter<GaitSource, SimClock>,
    matrix: ConsoleMatrix,
    telemetry: TelemetryLog<TELEMETRY_DEPTH>,
    realtime: bool,
    ticks: u64,
    stale_resets: u32,
    redraws: u64,
    last_display_ms: u64,
}

impl Simulation {
    pub fn new(config: SimConfig, realtime: bool) -> Self {
        let clock = SimClock::new(0);
        let source = GaitSource::new(config.gait.clone(), clock.clone());
        let counter = StepCounter::new(source, clock.clone(), config.detector);

        Self {
            config,
            clock,
            counter,
            matrix: ConsoleMatrix::new(realtime),
            telemetry: TelemetryLog::new(),
            realtime,
            ticks: 0,
            stale_resets: 0,
            redraws: 0,
            last_display_ms: 0,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn counter(&self) -> &StepCounter<GaitSource, SimClock> {
        &self.counter
    }

    pub fn matrix(&self) -> &ConsoleMatrix {
        &self.matrix
    }

    /// Times the matrix has been drawn
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn telemetry(&self) -> &TelemetryLog<TELEMETRY_DEPTH> {
        &self.telemetry
    }

    /// Advance one sample interval and tick once
    pub fn step(&mut self) -> StepEvent {
        let interval = self.counter.detector().sample_interval_ms();
        self.clock.advance(interval as u64);

        let event = self.counter.poll();
        self.ticks += 1;
        self.telemetry.record(self.counter.detector().telemetry());

        if event.stale_reset {
            self.stale_resets += 1;
        }
        if event.is_step() {
            debug!(
                "t={}ms smoothed={:.1} threshold={:.1} +{} → {}",
                event.timestamp, event.smoothed, event.threshold, event.credited, event.step_count
            );
        }

        if self.realtime {
            thread::sleep(Duration::from_millis(interval as u64));
        }
        event
    }

    /// Redraw the matrix from the current count
    pub fn redraw(&mut self) -> ProgressResult<()> {
        self.counter
            .graph_on_screen(&mut self.matrix, self.config.target)?;
        self.last_display_ms = self.clock.now();
        self.redraws += 1;
        Ok(())
    }

    /// Whether the configured redraw period has elapsed
    pub fn display_due(&self) -> bool {
        self.config.display_every_ms > 0
            && self.clock.now() - self.last_display_ms >= self.config.display_every_ms
    }

    /// Run until the configured duration, calling `on_event` after every tick
    pub fn run<F>(&mut self, mut on_event: F) -> ProgressResult<Summary>
    where
        F: FnMut(&Self, &StepEvent),
    {
        info!(
            "Simulating {} ms at {} ms per sample, cadence {} ms",
            self.config.duration_ms,
            self.counter.detector().sample_interval_ms(),
            self.config.gait.cadence_ms
        );

        while self.clock.now() < self.config.duration_ms {
            let event = self.step();
            if self.display_due() {
                self.redraw()?;
            }
            on_event(self, &event);
        }
        self.redraw()?;

        let summary = self.summary();
        info!(
            "{} steps counted, {} strides generated",
            summary.steps, summary.expected_strides
        );
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        let now = self.clock.now();
        Summary {
            duration_ms: now,
            ticks: self.ticks,
            steps: self.counter.steps(),
            expected_strides: self
                .config
                .gait
                .expected_strides(now, self.counter.detector().sample_interval_ms()),
            stale_resets: self.stale_resets,
            calibration: self.telemetry.calibration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::{GaitConfig, Pause};

    fn config(gait: GaitConfig, duration_ms: u64) -> SimConfig {
        SimConfig {
            gait: GaitConfig {
                noise_mg: 0.0,
                tilt_deg: 0.0,
                seed: Some(1),
                ..gait
            },
            duration_ms,
            ..SimConfig::default()
        }
    }

    #[test]
    fn steady_walk_is_counted() {
        let mut sim = Simulation::new(config(GaitConfig::default(), 30_000), false);
        let summary = sim.run(|_, _| {}).unwrap();

        assert_eq!(summary.ticks, 600);
        assert_eq!(summary.expected_strides, 50);
        let accuracy = summary.accuracy().unwrap();
        assert!(accuracy > 0.9 && accuracy <= 1.0, "accuracy {}", accuracy);
        assert_eq!(summary.stale_resets, 0);
    }

    #[test]
    fn standing_still_counts_nothing() {
        let gait = GaitConfig {
            cadence_ms: 0,
            ..GaitConfig::default()
        };
        let mut sim = Simulation::new(config(gait, 10_000), false);
        let summary = sim.run(|_, _| {}).unwrap();

        assert_eq!(summary.steps, 0);
        assert_eq!(summary.expected_strides, 0);
        assert!(summary.stale_resets >= 4);
        assert_eq!(summary.accuracy(), None);
    }

    #[test]
    fn long_pause_resets_and_walk_resumes() {
        let gait = GaitConfig {
            pauses: vec![Pause {
                start_ms: 10_000,
                duration_ms: 5_000,
            }],
            ..GaitConfig::default()
        };
        let mut sim = Simulation::new(config(gait, 25_000), false);

        let mut steps_at_pause_end = None;
        let summary = sim
            .run(|sim, event| {
                if event.timestamp == 15_000 {
                    steps_at_pause_end = Some(sim.counter().steps());
                }
            })
            .unwrap();

        assert!(summary.stale_resets >= 1);
        let paused = steps_at_pause_end.unwrap();
        assert!(summary.steps > paused);
    }

    #[test]
    fn matrix_redraws_on_schedule() {
        let mut sim = Simulation::new(config(GaitConfig::default(), 10_000), false);
        let mut redraw_times = Vec::new();
        sim.run(|sim, event| {
            if sim.redraws() as usize > redraw_times.len() {
                redraw_times.push(event.timestamp);
            }
        })
        .unwrap();

        assert_eq!(redraw_times, vec![5_000, 10_000]);
        // Final redraw after the loop
        assert_eq!(sim.redraws(), 3);
        assert_eq!(sim.telemetry().len(), TELEMETRY_DEPTH);
        // 16 of 100 steps: screen 3, four plots that all land on (0, 0)
        assert_eq!(sim.matrix().lit_count(), 1);
    }
}

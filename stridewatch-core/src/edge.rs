//! Edge Detector / Step State Machine
//!
//! ## States
//!
//! ```text
//!                 rise (current > previous [> threshold])
//!   ┌──────────────────┐ ─────────────────────────────▶ ┌─────────┐
//!   │ IdleRisingWatch  │                                │ Rising  │
//!   └──────────────────┘ ◀───────────────────────────── └─────────┘
//!            ▲            fall ∧ excursion ∧ debounce        │
//!            │                 (runs confidence gate)         │
//!            └──────────── stale-motion reset ◀───────────────┘
//! ```
//!
//! A fall that fails the excursion or debounce test leaves the machine in
//! `Rising`: the swing is still open and a later fall may close it.
//!
//! ## Confidence Gate
//!
//! Qualifying edges are not credited one by one until `required`
//! consecutive edges have been seen. Edges 1..required−1 credit nothing;
//! edge `required` credits all of them at once; every later edge credits
//! one. Isolated jolts produce one or two edges and then go quiet, which
//! the stale-motion reset turns into a cleared gate.
//!
//! ## Ownership
//!
//! This module is the only writer of the step count. Nothing outside
//! [`EdgeDetector::update`] increments it and nothing ever decrements it.

use crate::sample::Strength;
use crate::threshold::ThresholdState;
use crate::time::{elapsed_ms, Timestamp};

/// Edge detector phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgePhase {
    /// Waiting for the smoothed signal to start rising
    IdleRisingWatch,
    /// A rise is in progress, waiting for the fall that closes it
    Rising,
}

/// Extra condition on the idle → rising transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RiseGate {
    /// Any increase starts a rise
    Unconditional,
    /// The rising sample must also be above the threshold
    #[default]
    AboveThreshold,
}

/// What the edge detector did on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// No transition
    None,
    /// Idle → rising
    RiseStarted,
    /// Fall seen while rising, but the swing never cleared the threshold
    Shallow,
    /// Fall seen while rising, but too soon after the last step
    Debounced,
    /// Qualifying edge absorbed by the confidence gate
    Pending {
        /// Edges seen so far, including this one
        confirmed: u8,
        /// Edges needed before steps are credited
        required: u8,
    },
    /// Qualifying edge that credited steps
    Credited {
        /// Steps added by this edge
        steps: u32,
    },
}

impl EdgeOutcome {
    /// Whether this outcome was a qualifying edge
    pub fn is_edge(&self) -> bool {
        matches!(self, EdgeOutcome::Pending { .. } | EdgeOutcome::Credited { .. })
    }

    /// Steps credited by this outcome
    pub fn credited(&self) -> u32 {
        match self {
            EdgeOutcome::Credited { steps } => *steps,
            _ => 0,
        }
    }
}

/// Consecutive-edge gate in front of the step count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceGate {
    required: u8,
    confirmed: u8,
}

impl ConfidenceGate {
    /// Gate opening after `required` edges (zero behaves as one)
    pub fn new(required: u8) -> Self {
        Self {
            required: required.max(1),
            confirmed: 0,
        }
    }

    /// Register one qualifying edge, returning the steps it credits
    pub fn register(&mut self) -> u32 {
        if self.is_open() {
            return 1;
        }

        self.confirmed += 1;
        if self.confirmed == self.required {
            self.required as u32
        } else {
            0
        }
    }

    /// Whether edges are now credited one by one
    pub fn is_open(&self) -> bool {
        self.confirmed >= self.required
    }

    /// Edges seen since the last clear, capped at `required`
    pub fn confirmed(&self) -> u8 {
        self.confirmed
    }

    /// Edges needed to open
    pub fn required(&self) -> u8 {
        self.required
    }

    /// Forget accumulated edges
    pub fn clear(&mut self) {
        self.confirmed = 0;
    }
}

/// Rising/falling edge state machine and step counter
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    phase: EdgePhase,
    rise_gate: RiseGate,
    min_step_interval_ms: u32,
    stale_timeout_ms: u32,
    last_step_ms: Timestamp,
    since_last_step_ms: u64,
    gate: ConfidenceGate,
    step_count: u32,
}

impl EdgeDetector {
    /// New detector whose debounce and stale timers start at `now`
    pub fn new(
        rise_gate: RiseGate,
        min_step_interval_ms: u32,
        confidence_steps: u8,
        stale_timeout_ms: u32,
        now: Timestamp,
    ) -> Self {
        Self {
            phase: EdgePhase::IdleRisingWatch,
            rise_gate,
            min_step_interval_ms,
            stale_timeout_ms,
            last_step_ms: now,
            since_last_step_ms: 0,
            gate: ConfidenceGate::new(confidence_steps),
            step_count: 0,
        }
    }

    /// Run one transition for the newest smoothed sample
    pub fn update(
        &mut self,
        current: Strength,
        previous: Strength,
        threshold: &ThresholdState,
        now: Timestamp,
    ) -> EdgeOutcome {
        self.since_last_step_ms = elapsed_ms(self.last_step_ms, now);

        match self.phase {
            EdgePhase::IdleRisingWatch => {
                let above = match self.rise_gate {
                    RiseGate::Unconditional => true,
                    RiseGate::AboveThreshold => current > threshold.threshold,
                };

                if current > previous && above {
                    self.phase = EdgePhase::Rising;
                    log_trace!("Rise started at {} (threshold {})", current, threshold.threshold);
                    return EdgeOutcome::RiseStarted;
                }
                EdgeOutcome::None
            }

            EdgePhase::Rising => {
                if current >= previous {
                    return EdgeOutcome::None;
                }

                if !threshold.has_excursion() {
                    return EdgeOutcome::Shallow;
                }

                if self.since_last_step_ms <= self.min_step_interval_ms as u64 {
                    return EdgeOutcome::Debounced;
                }

                self.phase = EdgePhase::IdleRisingWatch;
                self.last_step_ms = now;
                self.since_last_step_ms = 0;

                let steps = self.gate.register();
                if steps == 0 {
                    return EdgeOutcome::Pending {
                        confirmed: self.gate.confirmed(),
                        required: self.gate.required(),
                    };
                }

                if steps > 1 {
                    log_info!("Confidence gate opened, crediting {} steps", steps);
                }
                self.step_count = self.step_count.saturating_add(steps);
                log_debug!("Step credited at {} ms, total {}", now, self.step_count);

                EdgeOutcome::Credited { steps }
            }
        }
    }

    /// Apply the stale-motion rule, returning whether it fired
    ///
    /// When no qualifying edge has been seen for longer than the timeout
    /// the phase and gate are cleared and the timer restarts at `now`.
    /// The caller is responsible for resetting the threshold tracker.
    pub fn expire_stale(&mut self, now: Timestamp) -> bool {
        let idle_ms = elapsed_ms(self.last_step_ms, now);
        if idle_ms <= self.stale_timeout_ms as u64 {
            return false;
        }

        self.phase = EdgePhase::IdleRisingWatch;
        self.gate.clear();
        self.last_step_ms = now;
        self.since_last_step_ms = 0;
        true
    }

    /// Current phase
    pub fn phase(&self) -> EdgePhase {
        self.phase
    }

    /// Steps credited so far
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Confidence gate state
    pub fn confidence(&self) -> ConfidenceGate {
        self.gate
    }

    /// Time of the last credited edge or stale reset
    pub fn last_step_ms(&self) -> Timestamp {
        self.last_step_ms
    }

    /// Milliseconds between the last confirmed step and the latest tick
    pub fn since_last_step_ms(&self) -> u64 {
        self.since_last_step_ms
    }

    /// Debounce window
    pub fn min_step_interval_ms(&self) -> u32 {
        self.min_step_interval_ms
    }

    /// Change the debounce window
    pub fn set_min_step_interval(&mut self, ms: u32) {
        self.min_step_interval_ms = ms;
    }

    /// Condition for starting a rise
    pub fn rise_gate(&self) -> RiseGate {
        self.rise_gate
    }
}

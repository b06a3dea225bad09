//! Telemetry for Calibration and Visualization
//!
//! ## Overview
//!
//! Tuning the threshold multiplier or the sensitivity needs to see what the
//! detector sees: the smoothed signal next to the moving threshold. A
//! [`Telemetry`] snapshot captures that state after a tick and a
//! [`TelemetryLog`] keeps the last `M` snapshots in a fixed `heapless`
//! ring, so a device can stream them over serial or a host can plot them.
//!
//! ## Memory
//!
//! ```text
//! Telemetry ≈ 36 bytes
//! TelemetryLog<64> ≈ 2.3 KB
//! ```
//!
//! The log never allocates; when full, recording drops the oldest entry.

use heapless::Deque;

use crate::edge::EdgePhase;
use crate::sample::Strength;
use crate::time::Timestamp;

/// Detector state after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telemetry {
    /// Tick time
    pub timestamp: Timestamp,
    /// Unsmoothed strength
    pub raw: Strength,
    /// Smoothed strength
    pub smoothed: Strength,
    /// Running peak
    pub peak: Strength,
    /// Running trough
    pub trough: Strength,
    /// Trigger threshold
    pub threshold: Strength,
    /// Edge detector phase
    pub phase: EdgePhase,
    /// Edges accumulated by the confidence gate
    pub confidence: u8,
    /// Steps counted so far
    pub step_count: u32,
}

/// Summary of a telemetry log for tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Lowest smoothed value seen
    pub min_smoothed: Strength,
    /// Highest smoothed value seen
    pub max_smoothed: Strength,
    /// Mean threshold over the log
    pub mean_threshold: Strength,
    /// Steps credited between the first and last snapshot
    pub steps: u32,
}

impl Calibration {
    /// Swing of the smoothed signal over the log
    pub fn swing(&self) -> Strength {
        self.max_smoothed - self.min_smoothed
    }

    /// Where the mean threshold sits inside the swing, 0.0 at the bottom
    ///
    /// `None` for a flat log.
    pub fn threshold_ratio(&self) -> Option<f32> {
        let swing = self.swing();
        if swing <= 0.0 {
            return None;
        }
        Some((self.mean_threshold - self.min_smoothed) / swing)
    }
}

/// Fixed-capacity ring of the most recent snapshots
#[derive(Debug, Clone)]
pub struct TelemetryLog<const M: usize> {
    entries: Deque<Telemetry, M>,
}

impl<const M: usize> TelemetryLog<M> {
    /// Empty log
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Append a snapshot, dropping the oldest when full
    pub fn record(&mut self, snapshot: Telemetry) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.entries.push_back(snapshot);
    }

    /// Snapshots held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot is held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest snapshot
    pub fn latest(&self) -> Option<&Telemetry> {
        self.entries.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Telemetry> {
        self.entries.iter()
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Summarize the log, `None` when empty
    pub fn calibration(&self) -> Option<Calibration> {
        let first = self.entries.front()?;
        let last = self.entries.back()?;

        let mut min_smoothed = first.smoothed;
        let mut max_smoothed = first.smoothed;
        let mut threshold_sum = 0.0;
        for entry in self.entries.iter() {
            min_smoothed = min_smoothed.min(entry.smoothed);
            max_smoothed = max_smoothed.max(entry.smoothed);
            threshold_sum += entry.threshold;
        }

        Some(Calibration {
            min_smoothed,
            max_smoothed,
            mean_threshold: threshold_sum / self.entries.len() as f32,
            steps: last.step_count.saturating_sub(first.step_count),
        })
    }
}

impl<const M: usize> Default for TelemetryLog<M> {
    fn default() -> Self {
        Self::new()
    }
}

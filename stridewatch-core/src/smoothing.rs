//! Triangular Moving Average
//!
//! Each raw sample produces exactly one smoothed sample. The filter looks at
//! the `k` most recent raw values and weights them linearly, newest
//! heaviest:
//!
//! ```text
//! k = 3:    weight   3     2     1
//!           sample  x[n] x[n-1] x[n-2]
//!
//! y[n] = (3·x[n] + 2·x[n-1] + 1·x[n-2]) / (3 + 2 + 1)
//! ```
//!
//! Compared with a flat average of the same length the peak of the output
//! lags the input by less, which keeps rise/fall timing close to the real
//! heel strike, while a single-sample spike is still cut to half its height
//! at `k = 3`.
//!
//! During fill-up only the samples that really arrived are used: `k` is
//! clamped to the window's observed count (and to its length), so the
//! first output equals the first input.

use crate::buffer::RollingWindow;
use crate::sample::Strength;

/// Stateless triangular smoothing over a [`RollingWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangularSmoother {
    coefficient: usize,
}

impl TriangularSmoother {
    /// Create a smoother over the `coefficient` most recent samples
    ///
    /// A coefficient of zero is treated as one (no smoothing).
    pub fn new(coefficient: usize) -> Self {
        Self {
            coefficient: coefficient.max(1),
        }
    }

    /// Configured coefficient `k`
    pub fn coefficient(&self) -> usize {
        self.coefficient
    }

    /// Number of samples actually used for `window`
    pub fn effective_len<const N: usize>(&self, window: &RollingWindow<N>) -> usize {
        self.coefficient.min(window.observed()).min(N).max(1)
    }

    /// Smoothed value of the most recent sample in `window`
    pub fn smooth<const N: usize>(&self, window: &RollingWindow<N>) -> Strength {
        let k = self.effective_len(window);

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (i, value) in window.recent().take(k).enumerate() {
            let weight = (k - i) as f32;
            weighted += weight * value;
            total_weight += weight;
        }

        weighted / total_weight
    }
}

impl Default for TriangularSmoother {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SMOOTHING_COEFFICIENT)
    }
}

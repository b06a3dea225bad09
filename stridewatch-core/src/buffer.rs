//! Fixed-Capacity Rolling Window
//!
//! ## Overview
//!
//! The detector keeps two histories of the same length: raw strengths and
//! smoothed strengths. Both are strict FIFOs whose length never changes:
//! every push evicts exactly one value, and that evicted value matters,
//! because the threshold tracker needs to know when a former extreme leaves
//! the window.
//!
//! ## Why Pre-Filled?
//!
//! A window that starts empty forces every consumer to handle "not enough
//! data yet". Instead the window is created full of a neutral value, so
//! `latest()`, `previous()` and `oldest()` are always defined and the tick
//! path needs no `Option` handling. [`RollingWindow::observed`] still
//! reports how many real samples have arrived, for the smoothing filter's
//! fill-up clamp.
//!
//! ## Memory Layout
//!
//! ```text
//! RollingWindow<5> after 7 pushes (a..g), head = 2:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  f  │  g  │  c  │  d  │  e  │   physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                head: oldest value, next slot to overwrite
//!
//! logical view (0 = oldest): [c, d, e, f, g]
//! ```
//!
//! Push is a single store plus an index increment: O(1) regardless of `N`.
//! `N` must be non-zero; this is checked at compile time.

use crate::sample::Strength;

/// Fixed-length FIFO of strengths, always exactly `N` long
///
/// ## Invariants
///
/// - `head < N`: the slot holding the oldest value and the next to be overwritten
/// - `observed <= N`: real pushes since the last fill, saturating
#[derive(Debug, Clone)]
pub struct RollingWindow<const N: usize> {
    data: [Strength; N],
    head: usize,
    observed: usize,
}

impl<const N: usize> RollingWindow<N> {
    const NON_EMPTY: () = assert!(N > 0, "RollingWindow capacity must be non-zero");

    /// Creates a window with every slot set to `neutral`
    pub const fn filled(neutral: Strength) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::NON_EMPTY;
        Self {
            data: [neutral; N],
            head: 0,
            observed: 0,
        }
    }

    /// Appends `value` and returns the evicted oldest value
    pub fn push(&mut self, value: Strength) -> Strength {
        let evicted = self.data[self.head];
        self.data[self.head] = value;
        self.head = (self.head + 1) % N;

        if self.observed < N {
            self.observed += 1;
        }

        evicted
    }

    /// Window length, always `N`
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of real samples pushed since the last fill, at most `N`
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Whether every slot holds a real sample
    pub fn is_warm(&self) -> bool {
        self.observed == N
    }

    /// Oldest value, the next one to be evicted
    pub fn oldest(&self) -> Strength {
        self.data[self.head]
    }

    /// Most recent value
    pub fn latest(&self) -> Strength {
        self.back(0)
    }

    /// Value pushed just before the most recent one
    ///
    /// For `N == 1` this is the latest value itself.
    pub fn previous(&self) -> Strength {
        self.back(1 % N)
    }

    /// Value at logical position `index` (0 = oldest, N-1 = newest)
    pub fn get(&self, index: usize) -> Option<Strength> {
        if index >= N {
            return None;
        }
        Some(self.data[(self.head + index) % N])
    }

    /// Value `age` pushes ago (0 = latest), wrapping within the window
    fn back(&self, age: usize) -> Strength {
        // head - 1 - age, kept non-negative by adding N before the modulo
        self.data[(self.head + N - 1 - (age % N)) % N]
    }

    /// Iterate from newest to oldest
    pub fn recent(&self) -> impl Iterator<Item = Strength> + '_ {
        (0..N).map(move |age| self.back(age))
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Strength> + '_ {
        (0..N).map(move |index| self.data[(self.head + index) % N])
    }

    /// Refill every slot with `neutral` and forget observed samples
    pub fn reset(&mut self, neutral: Strength) {
        self.data = [neutral; N];
        self.head = 0;
        self.observed = 0;
    }
}

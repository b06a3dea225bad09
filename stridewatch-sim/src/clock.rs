//! Simulated clock shared between the gait generator and the detector

use std::cell::Cell;
use std::rc::Rc;

use stridewatch_core::time::{TimeSource, Timestamp};

/// Millisecond clock advanced explicitly by the driving loop
///
/// Clones share the same time, so the sensor and the counter always agree
/// on "now".
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<Timestamp>>,
}

impl SimClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.now.set(timestamp);
    }
}

impl TimeSource for SimClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

//! 5×5 LED matrix drawn as text

use std::fmt;
use std::thread;
use std::time::Duration;

use stridewatch_core::constants::MATRIX_SIDE;
use stridewatch_core::ProgressDisplay;

const SIDE: usize = MATRIX_SIDE as usize;

/// In-memory LED matrix
///
/// With `realtime` set, `pause` really sleeps; otherwise pauses are only
/// accumulated so fast simulations stay fast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleMatrix {
    cells: [[bool; SIDE]; SIDE],
    realtime: bool,
    paused_ms: u64,
}

impl ConsoleMatrix {
    pub fn new(realtime: bool) -> Self {
        Self {
            realtime,
            ..Self::default()
        }
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&lit| lit).count()
    }

    /// Total time spent in `pause`
    pub fn paused_ms(&self) -> u64 {
        self.paused_ms
    }
}

impl ProgressDisplay for ConsoleMatrix {
    fn clear(&mut self) {
        self.cells = [[false; SIDE]; SIDE];
    }

    fn pause(&mut self, ms: u32) {
        self.paused_ms += ms as u64;
        if self.realtime {
            thread::sleep(Duration::from_millis(ms as u64));
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        // Off-matrix coordinates are ignored, as on the device
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < SIDE && y < SIDE {
                self.cells[y][x] = true;
            }
        }
    }
}

impl fmt::Display for ConsoleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|&lit| if lit { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

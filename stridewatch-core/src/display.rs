//! Progress Display on a 5×5 LED Matrix
//!
//! Maps a value in `0..=target` onto the 25 cells of the matrix and draws
//! it. The mapping is a fixed contract shared with existing firmware, so it
//! keeps its quirks:
//!
//! ```text
//! screen = value × 25 / target − 1      (integer division, toward zero)
//! ```
//!
//! - `value` is clamped into `[0, target]` before mapping
//! - a screen value of exactly 0 only clears the matrix
//! - otherwise: clear, pause 500 ms, then light `(0, i / 5)` for
//!   `i in 0..=screen`, a column growing with progress
//!
//! Note the `−1`: a value of zero maps to −1 (nothing lit after the clear)
//! and only `value × 25 / target == 1` maps to the "clear only" case.

use crate::constants::{MATRIX_CELLS, MATRIX_SIDE, PROGRESS_PAUSE_MS};
use crate::errors::{ProgressError, ProgressResult};

/// LED matrix seam
pub trait ProgressDisplay {
    /// Turn every LED off
    fn clear(&mut self);

    /// Block for `ms` milliseconds
    fn pause(&mut self, ms: u32);

    /// Light the LED at column `x`, row `y`
    fn plot(&mut self, x: i32, y: i32);
}

impl<D: ProgressDisplay + ?Sized> ProgressDisplay for &mut D {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn pause(&mut self, ms: u32) {
        (**self).pause(ms)
    }

    fn plot(&mut self, x: i32, y: i32) {
        (**self).plot(x, y)
    }
}

/// Map `value` onto the 25-cell scale for `target`, without clamping
///
/// Division truncates toward zero; the result may be negative or above 24
/// for values outside `[0, target]`. The product is taken in 128 bits and
/// results beyond the `i64` range saturate.
pub fn map_to_25(value: i64, target: u32) -> ProgressResult<i64> {
    if target == 0 {
        return Err(ProgressError::ZeroTarget);
    }
    let screen = value as i128 * MATRIX_CELLS as i128 / target as i128 - 1;
    Ok(screen.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
}

/// Clamp `value` into `[0, target]` and map it onto the 25-cell scale
pub fn screen_value(value: i64, target: u32) -> ProgressResult<i64> {
    if target == 0 {
        return Err(ProgressError::ZeroTarget);
    }
    map_to_25(value.clamp(0, target as i64), target)
}

/// What [`render_progress`] drew
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    /// Screen value was zero: cleared only
    Cleared,
    /// Cleared, paused and lit `cells` LEDs (possibly none)
    Bar {
        /// Mapped screen value, −1 to 24
        screen: i64,
        /// LEDs plotted
        cells: u32,
    },
}

/// Draw `value` out of `target` on `display`
pub fn render_progress<D: ProgressDisplay + ?Sized>(
    display: &mut D,
    value: i64,
    target: u32,
) -> ProgressResult<Rendered> {
    let screen = screen_value(value, target)?;

    display.clear();
    if screen == 0 {
        return Ok(Rendered::Cleared);
    }

    display.pause(PROGRESS_PAUSE_MS);
    let mut cells = 0;
    for index in 0..=screen {
        display.plot(0, (index / MATRIX_SIDE as i64) as i32);
        cells += 1;
    }

    Ok(Rendered::Bar { screen, cells })
}

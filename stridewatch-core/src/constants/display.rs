//! LED Matrix Constants

/// Side length of the square LED matrix.
pub const MATRIX_SIDE: i32 = 5;

/// Number of cells on the matrix, which is also the progress scale.
pub const MATRIX_CELLS: i32 = MATRIX_SIDE * MATRIX_SIDE;

/// Pause between clearing the matrix and drawing the bar (milliseconds).
pub const PROGRESS_PAUSE_MS: u32 = 500;

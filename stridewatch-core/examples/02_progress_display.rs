//! Progress Display Example
//!
//! Draws step progress on a 5×5 LED matrix rendered as text.
//!
//! ## What You'll Learn
//!
//! - Implementing `ProgressDisplay` for your own hardware
//! - How a count maps onto the 25 cells (and its off-by-one quirk)
//! - Why counts above the target draw as a full target
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_progress_display
//! ```

use stridewatch_core::{map_to_25, render_progress, ProgressDisplay};

/// 5×5 matrix kept in memory and printed on demand
#[derive(Default)]
struct TextMatrix {
    cells: [[bool; 5]; 5],
    paused_ms: u32,
}

impl TextMatrix {
    fn print(&self) {
        for row in &self.cells {
            let line: String = row.iter().map(|&lit| if lit { '#' } else { '.' }).collect();
            println!("    {}", line);
        }
    }
}

impl ProgressDisplay for TextMatrix {
    fn clear(&mut self) {
        self.cells = [[false; 5]; 5];
    }

    fn pause(&mut self, ms: u32) {
        // A real device would block here
        self.paused_ms += ms;
    }

    fn plot(&mut self, x: i32, y: i32) {
        if (0..5).contains(&x) && (0..5).contains(&y) {
            self.cells[y as usize][x as usize] = true;
        }
    }
}

fn main() {
    println!("Stridewatch Progress Display Example");
    println!("====================================\n");

    let target = 100;
    println!("Mapping steps onto the matrix (target {}):", target);
    for steps in [0, 3, 4, 25, 50, 99, 100, 150] {
        match map_to_25(steps.min(target as i64), target) {
            Ok(screen) => println!("  {:3} steps → screen {:2}", steps, screen),
            Err(e) => println!("  {:3} steps → error: {}", steps, e),
        }
    }
    println!();

    let mut matrix = TextMatrix::default();
    for steps in [4, 50, 100, 150] {
        match render_progress(&mut matrix, steps, target) {
            Ok(rendered) => {
                println!("  {} of {} steps: {:?}", steps, target, rendered);
                matrix.print();
            }
            Err(e) => println!("  {} of {} steps: error: {}", steps, target, e),
        }
        println!();
    }

    println!("Zero target:");
    if let Err(e) = render_progress(&mut matrix, 10, 0) {
        println!("  rejected: {}", e);
    }
    println!("\nTotal pause time: {} ms", matrix.paused_ms);

    println!("\n{}", "=".repeat(60));
    println!("Key Insights:");
    println!("- screen = steps × 25 / target − 1, with integer division");
    println!("- A screen value of 0 only clears the matrix");
    println!("- Counts above the target are drawn as exactly the target");
}

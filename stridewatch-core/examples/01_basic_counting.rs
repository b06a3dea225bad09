//! Basic Step Counting Example
//!
//! Feeds a synthetic walk through the detector and prints what happens
//! on every tick that matters.
//!
//! ## What You'll Learn
//!
//! - Creating a detector and ticking it at a fixed rate
//! - How the confidence gate holds back the first steps
//! - How the stale-motion reset forgets an interrupted walk
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_counting
//! ```

use stridewatch_core::{DetectorConfig, EdgeOutcome, StepDetector, StepEvent};

const INTERVAL_MS: u64 = 50;

/// One 600 ms stride: ±450 mg triangle around 1 g
fn stride() -> [f32; 12] {
    let mut values = [0.0; 12];
    for (i, value) in values.iter_mut().enumerate() {
        let offset = match i {
            0..=3 => i as f32,
            4..=9 => 6.0 - i as f32,
            _ => i as f32 - 12.0,
        };
        *value = 1024.0 + offset * 150.0;
    }
    values
}

fn describe(event: &StepEvent) -> Option<String> {
    let text = match event.outcome {
        EdgeOutcome::Pending { confirmed, required } => {
            format!("edge {}/{} held by confidence gate", confirmed, required)
        }
        EdgeOutcome::Credited { steps } if steps > 1 => {
            format!("gate opened, {} steps credited at once", steps)
        }
        EdgeOutcome::Credited { .. } => "step".to_string(),
        EdgeOutcome::Debounced => "fall ignored (too soon after last step)".to_string(),
        _ if event.stale_reset => "no steps for 2 s, threshold reset".to_string(),
        _ => return None,
    };
    Some(text)
}

fn run(detector: &mut StepDetector, now: &mut u64, samples: impl IntoIterator<Item = f32>) {
    for strength in samples {
        *now += INTERVAL_MS;
        let event = detector.tick(strength, *now);
        if let Some(text) = describe(&event) {
            println!(
                "  t={:5}ms smoothed={:7.1} threshold={:7.1} total={:2}  {}",
                event.timestamp, event.smoothed, event.threshold, event.step_count, text
            );
        }
    }
}

fn main() {
    println!("Stridewatch Basic Counting Example");
    println!("==================================\n");

    let config = DetectorConfig::walking();
    println!("Detector configuration:");
    println!("  Sample interval:   {} ms", config.sample_interval_ms);
    println!("  Smoothing (k):     {}", config.smoothing_coefficient);
    println!("  Multiplier:        {}", config.threshold_multiplier);
    println!("  Min step interval: {} ms", config.min_step_interval_ms);
    println!("  Confidence steps:  {}", config.confidence_steps);
    println!();

    let mut detector: StepDetector = StepDetector::new(config, 0);
    let mut now = 0;

    println!("Walking 10 strides:");
    run(&mut detector, &mut now, stride().iter().copied().cycle().take(12 * 10));
    println!("  → {} steps\n", detector.step_count());

    println!("Standing still for 3 s:");
    run(&mut detector, &mut now, std::iter::repeat(1024.0).take(60));
    println!("  → {} steps\n", detector.step_count());

    println!("Two strides, then still again:");
    run(&mut detector, &mut now, stride().iter().copied().cycle().take(12 * 2));
    run(&mut detector, &mut now, std::iter::repeat(1024.0).take(60));
    println!("  → {} steps (two isolated strides never reach the gate)\n", detector.step_count());

    println!("{}", "=".repeat(60));
    println!("Key Insights:");
    println!("- The threshold adapts to the swing of the signal, not to a fixed level");
    println!("- The first steps of a walk are credited together once the gate opens");
    println!("- Short bursts of motion are dropped by the stale-motion reset");
}

//! Property tests for detector invariants

mod common;

use common::RecordingDisplay;
use proptest::prelude::*;
use stridewatch_core::{display::screen_value, render_progress, DetectorConfig, StepDetector};

/// Strength samples with the gap since the previous tick (ms)
fn samples() -> impl Strategy<Value = Vec<(f32, u64)>> {
    prop::collection::vec((0.0f32..3000.0, 1u64..200), 1..400)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn step_count_never_decreases(input in samples()) {
        let mut detector: StepDetector = StepDetector::new(DetectorConfig::default(), 0);
        let mut now = 0;
        let mut last_count = 0;
        let mut credited = 0;

        for (strength, gap) in input {
            now += gap;
            let event = detector.tick(strength, now);

            prop_assert!(event.step_count >= last_count);
            prop_assert_eq!(event.step_count, detector.step_count());
            credited += event.credited;
            last_count = event.step_count;
        }
        prop_assert_eq!(credited, detector.step_count());
    }

    #[test]
    fn amplitude_is_never_negative(input in samples(), multiplier in 0.0f32..=1.0) {
        let config = DetectorConfig::default().with_threshold_multiplier(multiplier);
        let mut detector: StepDetector = StepDetector::new(config, 0);
        let mut now = 0;

        for (strength, gap) in input {
            now += gap;
            detector.tick(strength, now);

            prop_assert!(detector.peak() >= detector.trough());
            prop_assert!(detector.amplitude() >= 0.0);
            // Full sensitivity: threshold sits inside the range, up to rounding
            prop_assert!(detector.threshold() >= detector.trough());
            prop_assert!(detector.threshold() <= detector.peak() + 0.501);
        }
    }

    #[test]
    fn constant_input_converges_within_k_ticks(
        history in prop::collection::vec(0.0f32..3000.0, 0..60),
        level in -4000.0f32..4000.0,
        k in 1usize..8,
    ) {
        let config = DetectorConfig::default().with_smoothing(k);
        let mut detector: StepDetector = StepDetector::new(config, 0);
        let mut now = 0;

        for strength in history {
            now += 50;
            detector.tick(strength, now);
        }
        for _ in 0..k {
            now += 50;
            detector.tick(level, now);
        }

        let tolerance = 1e-3 * level.abs().max(1.0);
        prop_assert!((detector.latest_smoothed() - level).abs() <= tolerance);
    }

    #[test]
    fn progress_above_target_draws_as_target(target in 1u32..10_000, over in 1i64..100_000) {
        let mut clamped = RecordingDisplay::default();
        let mut exact = RecordingDisplay::default();

        let a = render_progress(&mut clamped, target as i64 + over, target);
        let b = render_progress(&mut exact, target as i64, target);

        prop_assert_eq!(a, b);
        prop_assert_eq!(clamped, exact);
    }

    #[test]
    fn screen_value_stays_on_the_matrix(target in 1u32..10_000, value in -100_000i64..100_000) {
        let screen = screen_value(value, target).unwrap();
        prop_assert!((-1..=24).contains(&screen));
    }
}

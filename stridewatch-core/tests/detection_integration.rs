//! End-to-end detection tests
//!
//! Drive the full tick pipeline with synthetic gait signals and check the
//! behaviour a wearer would notice: steady walking is counted, jolts and
//! shuffles are not, and the display follows the count.

mod common;

use common::*;
use stridewatch_core::{
    display::Rendered,
    edge::{EdgeDetector, EdgePhase},
    render_progress,
    sample::AccelerationVector,
    threshold::ThresholdState,
    time::MockTimeSource,
    DetectorConfig, EdgeOutcome, RiseGate, StepCounter, StepDetector,
};

fn default_detector() -> StepDetector {
    StepDetector::new(DetectorConfig::default(), 0)
}

// ===== WALKING =====

#[test]
fn test_steady_walk_is_counted() {
    // 600 ms per step, ±450 mg around 1 g
    let mut feeder = Feeder::new(default_detector());
    let credited = feeder.feed(&walking_signal(BASELINE, 450.0, 12, 12));

    let steps = feeder.detector.step_count();
    assert_eq!(credited, steps);
    // The first swing overlaps the debounce window after power-on
    assert!((10..=12).contains(&steps), "counted {steps} steps for 12 strides");
}

#[test]
fn test_steps_are_credited_in_bulk_once_gate_opens() {
    let mut feeder = Feeder::new(default_detector());
    feeder.feed(&walking_signal(BASELINE, 450.0, 12, 12));

    let first = feeder
        .events
        .iter()
        .find(|e| e.is_step())
        .expect("walking should credit steps");
    assert_eq!(first.credited, 3);
    assert_eq!(first.step_count, 3);

    // Every later step is credited on its own
    assert!(feeder
        .events
        .iter()
        .filter(|e| e.is_step())
        .skip(1)
        .all(|e| e.credited == 1));
}

#[test]
fn test_credited_steps_respect_min_interval() {
    // 400 ms cadence is faster than the 500 ms debounce allows
    let mut feeder = Feeder::new(default_detector());
    feeder.feed(&walking_signal(BASELINE, 400.0, 8, 20));

    let steps = feeder.detector.step_count() as u64;
    assert!(steps * 500 < feeder.now, "{steps} steps in {} ms", feeder.now);

    let step_times: Vec<u64> = feeder
        .events
        .iter()
        .filter(|e| e.outcome.is_edge())
        .map(|e| e.timestamp)
        .collect();
    assert!(step_times.windows(2).all(|w| w[1] - w[0] > 500));
}

#[test]
fn test_running_preset_counts_fast_cadence() {
    // Same 400 ms cadence, tuned for running
    let mut feeder = Feeder::new(StepDetector::<40>::new(DetectorConfig::running(), 0));
    feeder.feed(&walking_signal(BASELINE, 400.0, 8, 20));

    let step_times: Vec<u64> = feeder
        .events
        .iter()
        .filter(|e| e.outcome.is_edge())
        .map(|e| e.timestamp)
        .collect();
    assert!(step_times.windows(2).all(|w| w[1] - w[0] > 250));
    assert!(feeder.detector.step_count() > 0);
}

// ===== REJECTION =====

#[test]
fn test_flat_signal_counts_nothing() {
    let mut feeder = Feeder::new(default_detector());
    let credited = feeder.feed(&flat(BASELINE, 400));

    assert_eq!(credited, 0);
    assert_eq!(feeder.detector.amplitude(), 0.0);
}

#[test]
fn test_isolated_jolt_then_stillness() {
    let mut detector = default_detector();
    let mut now = 0;

    for strength in [1400.0, 1500.0, 700.0] {
        now += INTERVAL_MS;
        detector.tick(strength, now);
    }
    assert!(detector.amplitude() > 0.0);

    let reset = loop {
        now += INTERVAL_MS;
        let event = detector.tick(BASELINE, now);
        if event.stale_reset {
            break event;
        }
        assert!(now < 5_000, "stale-motion reset never fired");
    };

    assert_eq!(reset.timestamp, 2050);
    assert_eq!(detector.step_count(), 0);
    assert_eq!(detector.peak(), BASELINE);
    assert_eq!(detector.trough(), BASELINE);
    assert_eq!(detector.phase(), EdgePhase::IdleRisingWatch);
    assert_eq!(detector.confidence_count(), 0);
}

#[test]
fn test_stale_reset_repeats_while_still() {
    let mut feeder = Feeder::new(default_detector());
    feeder.feed(&flat(BASELINE, 200)); // 10 s

    let resets: Vec<u64> = feeder
        .events
        .iter()
        .filter(|e| e.stale_reset)
        .map(|e| e.timestamp)
        .collect();
    assert_eq!(resets, vec![2050, 4100, 6150, 8200]);
}

// ===== CONFIDENCE GATE =====

fn gate_threshold() -> ThresholdState {
    ThresholdState {
        peak: 300.0,
        trough: 100.0,
        amplitude: 200.0,
        threshold: 150.0,
    }
}

fn run_cycles(detector: &mut EdgeDetector, previous: &mut f32, now: &mut u64, cycles: usize) -> u32 {
    let threshold = gate_threshold();
    let mut credited = 0;
    for _ in 0..cycles {
        for value in ramp_cycle(100.0, 300.0, 5, 5) {
            *now += INTERVAL_MS;
            credited += detector.update(value, *previous, &threshold, *now).credited();
            *previous = value;
        }
    }
    credited
}

#[test]
fn test_gate_restarts_after_stale_reset() {
    let mut detector = EdgeDetector::new(RiseGate::AboveThreshold, 0, 3, 2000, 0);
    let (mut previous, mut now) = (100.0, 0);

    assert_eq!(run_cycles(&mut detector, &mut previous, &mut now, 2), 0);
    assert_eq!(detector.confidence().confirmed(), 2);

    // Stand still past the timeout
    let last_edge = detector.last_step_ms();
    while !detector.expire_stale(now) {
        now += INTERVAL_MS;
    }
    assert!(now - last_edge > 2000);
    assert_eq!(detector.confidence().confirmed(), 0);

    // Two more swings are not enough on their own
    assert_eq!(run_cycles(&mut detector, &mut previous, &mut now, 2), 0);
    assert_eq!(detector.step_count(), 0);

    assert_eq!(run_cycles(&mut detector, &mut previous, &mut now, 1), 3);
    assert_eq!(detector.step_count(), 3);
}

#[test]
fn test_single_edge_confidence_counts_immediately() {
    let mut detector = EdgeDetector::new(RiseGate::AboveThreshold, 0, 1, 2000, 0);
    let (mut previous, mut now) = (100.0, 0);

    assert_eq!(run_cycles(&mut detector, &mut previous, &mut now, 1), 1);
}

#[test]
fn test_fall_outcomes_during_a_swing() {
    let mut detector = EdgeDetector::new(RiseGate::AboveThreshold, 500, 1, 2000, 0);
    let (mut previous, mut now) = (100.0, 0);
    let threshold = gate_threshold();

    let outcomes: Vec<EdgeOutcome> = ramp_cycle(100.0, 300.0, 5, 5)
        .into_iter()
        .map(|value| {
            now += INTERVAL_MS;
            let outcome = detector.update(value, previous, &threshold, now);
            previous = value;
            outcome
        })
        .collect();

    // 140 is still below the threshold, 180 starts the rise
    assert_eq!(outcomes[0], EdgeOutcome::None);
    assert_eq!(outcomes[1], EdgeOutcome::RiseStarted);
    // Falls at 300..500 ms are inside the debounce window
    assert!(outcomes[5..].iter().all(|o| *o == EdgeOutcome::Debounced));
    assert_eq!(detector.phase(), EdgePhase::Rising);
}

// ===== COUNTER + DISPLAY =====

#[test]
fn test_counter_walk_and_graph() {
    let strengths = walking_signal(BASELINE, 450.0, 12, 12);
    let clock = MockTimeSource::new(0);
    let source = ScriptedSource::from_strengths(&strengths);
    let mut counter: StepCounter<_, _> = StepCounter::new(source, &clock, DetectorConfig::default());

    for _ in 0..strengths.len() {
        clock.advance(INTERVAL_MS);
        counter.poll();
    }
    assert_eq!(counter.source().remaining(), 0);

    let steps = counter.steps();
    assert!((10..=12).contains(&steps));

    let mut display = RecordingDisplay::default();
    let rendered = counter.graph_on_screen(&mut display, 20).unwrap();

    // 10..=12 of 20 → screen 11..=14
    match rendered {
        Rendered::Bar { screen, cells } => {
            assert!((11..=14).contains(&screen));
            assert_eq!(cells as i64, screen + 1);
        }
        Rendered::Cleared => panic!("expected a bar"),
    }
    assert_eq!(display.pauses, vec![500]);
    assert!(display.plots.iter().all(|&(x, y)| x == 0 && (0..=2).contains(&y)));
}

#[test]
fn test_fixed_orientation_counts_face_up_walk() {
    // Face up: 1 g rests on Z with a negative sign; the X/Y wobble cancels
    // in the signed sum but not in the magnitude
    let strengths = walking_signal(-BASELINE, 450.0, 12, 12);
    let vectors = strengths
        .iter()
        .map(|&z| AccelerationVector::new(40, -40, z as i32))
        .collect();
    let clock = MockTimeSource::new(0);
    let mut counter: StepCounter<_, _> =
        StepCounter::new(ScriptedSource::new(vectors), &clock, DetectorConfig::fixed_orientation());

    let mut strengths_seen = Vec::new();
    for _ in 0..strengths.len() {
        clock.advance(INTERVAL_MS);
        strengths_seen.push(counter.poll().raw);
    }

    // The detector sees the Z trace itself
    let expected: Vec<f32> = strengths.iter().map(|&z| z as i32 as f32).collect();
    assert_eq!(strengths_seen, expected);

    let steps = counter.steps();
    assert!((10..=12).contains(&steps), "counted {steps} steps for 12 strides");
    assert!(counter.detector().peak() < 0.0);
    assert!(counter.detector().trough() < -BASELINE);
}

#[test]
fn test_over_target_draws_full_target() {
    let mut over = RecordingDisplay::default();
    let mut full = RecordingDisplay::default();

    render_progress(&mut over, 150, 100).unwrap();
    render_progress(&mut full, 100, 100).unwrap();

    assert_eq!(over, full);
    assert_eq!(full.plots.len(), 25);
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stridewatch_core::buffer::RollingWindow;
use stridewatch_core::sample::{strength, AccelerationVector, StrengthMode};
use stridewatch_core::smoothing::TriangularSmoother;
use stridewatch_core::{DetectorConfig, StepDetector};

const SMOOTHING_COEFFICIENTS: &[usize] = &[1, 3, 8, 16];
const TICKS: u64 = 1000;

/// ±400 mg triangle around 1 g, 12 samples per step
fn gait(i: u64) -> f32 {
    let phase = (i % 12) as f32;
    let offset = if phase <= 3.0 {
        phase
    } else if phase <= 9.0 {
        6.0 - phase
    } else {
        phase - 12.0
    };
    1024.0 + offset * 133.0
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.throughput(Throughput::Elements(TICKS));

    for &k in SMOOTHING_COEFFICIENTS {
        group.bench_with_input(BenchmarkId::new("walking", k), &k, |b, &k| {
            let config = DetectorConfig::default().with_smoothing(k);
            let mut detector: StepDetector = StepDetector::new(config, 0);
            let mut now = 0;

            b.iter(|| {
                for i in 0..TICKS {
                    now += 50;
                    black_box(detector.tick(black_box(gait(i)), now));
                }
            });
        });
    }

    // Window length only changes memory, never per-tick work
    group.bench_function("window_400", |b| {
        let mut detector: StepDetector<400> = StepDetector::new(DetectorConfig::default(), 0);
        let mut now = 0;

        b.iter(|| {
            for i in 0..TICKS {
                now += 5;
                black_box(detector.tick(black_box(gait(i)), now));
            }
        });
    });

    group.finish();
}

fn benchmark_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    group.bench_function("magnitude", |b| {
        let vector = AccelerationVector::new(120, -340, -980);
        b.iter(|| strength(StrengthMode::Magnitude, black_box(vector)));
    });

    group.bench_function("signed_sum", |b| {
        let vector = AccelerationVector::new(120, -340, -980);
        b.iter(|| strength(StrengthMode::SignedSum, black_box(vector)));
    });

    group.bench_function("smooth_k3", |b| {
        let smoother = TriangularSmoother::new(3);
        let mut window = RollingWindow::<40>::filled(1024.0);
        for i in 0..40 {
            window.push(gait(i));
        }
        b.iter(|| smoother.smooth(black_box(&window)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_tick, benchmark_components);
criterion_main!(benches);

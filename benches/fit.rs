use adcal::calibrator::{error_stats, fit};
use adcal::sample::{Sample, SampleSet};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate a synthetic measurement table with deterministic pseudo-noise
fn generate_samples(count: usize) -> SampleSet {
    let samples: Vec<Sample> = (0..count)
        .map(|i| {
            let raw = 100.0 + i as f64 * 3.7;
            // Small deterministic ripple so the fit is not exact.
            let noise = ((i as f64) * 0.731).sin() * 0.01;
            Sample::new(0.0025 * raw - 1.5 + noise, raw)
        })
        .collect();
    SampleSet::new(samples).expect("synthetic samples are valid")
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");

    for count in [10, 1_000, 100_000] {
        let samples = generate_samples(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
            b.iter(|| fit(samples).expect("fit succeeds"));
        });
    }

    group.finish();
}

fn bench_error_stats(c: &mut Criterion) {
    let samples = generate_samples(10_000);
    let fitted = fit(&samples).expect("fit succeeds");

    c.bench_function("error_stats/10000", |b| {
        b.iter(|| error_stats(&samples, &fitted).expect("stats succeed"));
    });
}

criterion_group!(benches, bench_fit, bench_error_stats);
criterion_main!(benches);

mod common;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{real_from_f64, verbose};
use constructive_reals::Real;

const SAMPLE_COUNT: usize = 1_000;

fn bench_materialize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pairs: Vec<(f64, f64)> = (0..SAMPLE_COUNT)
        .map(|_| (rng.gen_range(-1.0e6..1.0e6), rng.gen_range(0.5..1.0e3)))
        .collect();

    if verbose() {
        let (a, b) = pairs[0];
        let quotient = (real_from_f64(a) / real_from_f64(b))
            .to_f64()
            .expect("to_f64 should succeed");
        eprintln!("[materialize] {a} / {b} = {quotient}");
    }

    let mut group = c.benchmark_group("materialize");
    group.sample_size(10);

    group.bench_function("round_trip", |b| {
        b.iter(|| {
            for &(value, _) in &pairs {
                black_box(real_from_f64(value).to_f64().expect("to_f64 should succeed"));
            }
        })
    });

    group.bench_function("quotient_f64", |b| {
        b.iter(|| {
            for &(numerator, denominator) in &pairs {
                let quotient = real_from_f64(numerator) / real_from_f64(denominator);
                black_box(quotient.to_f64().expect("to_f64 should succeed"));
            }
        })
    });

    group.bench_function("third_f32", |b| {
        b.iter(|| {
            for &(value, _) in &pairs {
                let scaled = real_from_f64(value) / Real::from(3);
                black_box(scaled.to_f32().expect("to_f32 should succeed"));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);

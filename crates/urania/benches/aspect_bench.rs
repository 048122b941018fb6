use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::aspects::{find_aspects, AspectCalculator, DEFAULT_ASPECTS, DEFAULT_ORB};
use urania::bodies::{Body, BodySet};
use urania::houses::{house_of, HouseCusps};

fn full_chart() -> BodySet {
    Body::all()
        .enumerate()
        .map(|(i, body)| (body, (i as f64) * 29.5))
        .collect()
}

fn bench_find_aspects(c: &mut Criterion) {
    let bodies = full_chart();

    c.bench_function("find_aspects", |b| {
        b.iter(|| find_aspects(black_box(&bodies), black_box(DEFAULT_ASPECTS), black_box(DEFAULT_ORB)))
    });
}

fn bench_calculator_compute(c: &mut Criterion) {
    let bodies = full_chart();
    let calculator = AspectCalculator::with_orb(8.0);

    c.bench_function("aspect_calculator_compute", |b| {
        b.iter(|| calculator.compute(black_box(&bodies)))
    });
}

fn bench_house_of(c: &mut Criterion) {
    let cusps = HouseCusps::new([
        100.0, 125.5, 152.0, 183.0, 215.0, 248.0, 280.0, 305.5, 332.0, 3.0, 35.0, 68.0,
    ]);

    c.bench_function("house_of", |b| {
        b.iter(|| house_of(black_box(&cusps), black_box(97.0)))
    });
}

criterion_group!(benches, bench_find_aspects, bench_calculator_compute, bench_house_of);
criterion_main!(benches);

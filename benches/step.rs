//! Benchmarks for the per-frame simulation step and instance emission.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fizz::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn flute() -> RadiusProfile {
    RadiusProfile::from_fn(0.0, 0.2, 32, |y| 0.09 * y.sqrt())
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    let profile = flute();
    let center = Vec3::new(0.0, 0.1, 0.0);

    for count in [100u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("bubbles", count), &count, |b, &count| {
            let config = ParticleConfig::bubbles().with_count(count).with_seed(1);
            let mut sim = ParticleSimulator::new(config, &profile, center).unwrap();
            b.iter(|| sim.step(black_box(DT), &profile, center))
        });

        group.bench_with_input(BenchmarkId::new("foam", count), &count, |b, &count| {
            let config = ParticleConfig::foam().with_count(count).with_seed(1);
            let mut sim = ParticleSimulator::new(config, &profile, center).unwrap();
            b.iter(|| sim.step(black_box(DT), &profile, center))
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let profile = flute();
    let center = Vec3::new(0.0, 0.1, 0.0);
    let config = ParticleConfig::sparkling().with_count(1_000).with_seed(2);
    let sim = ParticleSimulator::new(config, &profile, center).unwrap();
    let mut emitter = InstanceEmitter::with_capacity(sim.len());

    c.bench_function("emit_1000", |b| {
        b.iter(|| {
            emitter.write(black_box(&sim));
            black_box(emitter.as_bytes().len())
        })
    });
}

fn bench_sample_radius(c: &mut Criterion) {
    let profile = flute();
    c.bench_function("sample_radius", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..256 {
                sum += profile.sample_radius(black_box(i as f32 / 255.0));
            }
            sum
        })
    });
}

criterion_group!(benches, bench_step, bench_emit, bench_sample_radius);
criterion_main!(benches);

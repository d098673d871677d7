//! Benchmarks for the per-frame particle update and render data extraction.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use trailsim::render::{particle_vertices, trail_lines};
use trailsim::{CylinderEmitter, ParticleSystem, PlaneAttractor};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_update");
    let floor = PlaneAttractor::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, 0.5, 8.0).unwrap();

    for count in [50usize, 200, 500, 5_000] {
        group.bench_with_input(BenchmarkId::new("free", count), &count, |b, &count| {
            let mut system = ParticleSystem::new(count, 4, CylinderEmitter::default()).with_seed(1);
            b.iter(|| black_box(system.update(black_box(1.0 / 60.0), None)))
        });

        group.bench_with_input(BenchmarkId::new("attracted", count), &count, |b, &count| {
            let mut system = ParticleSystem::new(count, 4, CylinderEmitter::default()).with_seed(1);
            b.iter(|| black_box(system.update(black_box(1.0 / 60.0), Some(&floor))))
        });
    }

    group.finish();
}

fn bench_trail_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("trail_length");

    for trail in [1usize, 4, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(trail), &trail, |b, &trail| {
            let mut system = ParticleSystem::new(500, trail, CylinderEmitter::default()).with_seed(2);
            b.iter(|| black_box(system.update(1.0 / 60.0, None)))
        });
    }

    group.finish();
}

fn bench_render_data(c: &mut Criterion) {
    let mut system = ParticleSystem::new(500, 10, CylinderEmitter::default()).with_seed(3);
    for _ in 0..20 {
        system.update(1.0 / 60.0, None);
    }

    c.bench_function("particle_vertices_500", |b| {
        b.iter(|| black_box(particle_vertices(system.particles())))
    });
    c.bench_function("trail_lines_500x10", |b| {
        b.iter(|| black_box(trail_lines(system.particles())))
    });
}

criterion_group!(benches, bench_update, bench_trail_lengths, bench_render_data);
criterion_main!(benches);

//! Benchmark for noise sampling and height-field evaluation.
//!
//! Run with: cargo bench --package stratum_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stratum_procedural::{BorderedMap, Perlin, Sampler, TerrainShaper, WorldSeed, PADDING};

fn benchmark_single_sample(c: &mut Criterion) {
    let perlin = Perlin::new();

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(perlin.noise(black_box(x), 0.0, black_box(x * 0.7)))
        });
    });
}

fn benchmark_fbm(c: &mut Criterion) {
    let perlin = Perlin::new();

    c.bench_function("fbm_6_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(perlin.fbm(black_box(x), 0.0, black_box(x * 0.7), Perlin::OCTAVES, Perlin::PERSISTENCE))
        });
    });
}

fn benchmark_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_column");
    for (name, sampler) in [("fractal", Sampler::Fractal), ("single", Sampler::Single)] {
        let shaper = TerrainShaper::new(sampler, WorldSeed::new(42));
        group.bench_function(name, |b| {
            let mut x = 0i32;
            b.iter(|| {
                x = x.wrapping_add(1);
                black_box(shaper.column(black_box(x), black_box(x / 3)))
            });
        });
    }
    group.finish();
}

fn benchmark_padded_window(c: &mut Criterion) {
    let shaper = TerrainShaper::new(Sampler::Fractal, WorldSeed::new(42));

    let mut group = c.benchmark_group("padded_window");
    // 32x32 columns per 16x16 chunk
    group.throughput(Throughput::Elements(32 * 32));
    group.sample_size(20);
    group.bench_function("fill_window_fractal", |b| {
        b.iter(|| {
            let mut map = BorderedMap::for_chunk(0, 0, 16, 16, PADDING).unwrap();
            shaper.fill_window(&mut map).unwrap();
            black_box(map)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_fbm,
    benchmark_column,
    benchmark_padded_window
);
criterion_main!(benches);

//! Benchmarks for whole-array extraction on sphere volumes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isosurface::{
  extract_isosurface_2d, extract_isosurface_3d, BatchConfig, BatchExtractor, Field, TopologyTables,
  Volume, VolumeBatch,
};

/// Generate `distance - radius` samples around the center of a `side`³ grid.
fn generate_sphere_sdf(side: usize, radius: f32) -> Vec<f32> {
  let center = (side - 1) as f32 / 2.0;
  let mut sdf = Vec::with_capacity(side * side * side);

  for x in 0..side {
    for y in 0..side {
      for z in 0..side {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let dz = z as f32 - center;
        sdf.push((dx * dx + dy * dy + dz * dz).sqrt() - radius);
      }
    }
  }

  sdf
}

/// Generate `distance - radius` samples around the center of a `side`² grid.
fn generate_circle_sdf(side: usize, radius: f32) -> Vec<f32> {
  let center = (side - 1) as f32 / 2.0;
  (0..side * side)
    .map(|i| {
      let dx = (i / side) as f32 - center;
      let dy = (i % side) as f32 - center;
      (dx * dx + dy * dy).sqrt() - radius
    })
    .collect()
}

/// Single-volume extraction across grid sizes.
fn bench_marching_cubes(c: &mut Criterion) {
  let mut group = c.benchmark_group("marching_cubes_sphere");

  for side in [16usize, 32, 64] {
    let sdf = generate_sphere_sdf(side, side as f32 * 0.375);
    let volume = Volume::new(&sdf, [side, side, side]).expect("valid shape");
    group.throughput(Throughput::Elements((side * side * side) as u64));

    group.bench_with_input(BenchmarkId::from_parameter(side), &volume, |b, volume| {
      b.iter(|| black_box(extract_isosurface_3d(black_box(volume), 0.0)))
    });
  }

  group.finish();
}

/// Level outside the sample range (fast path).
fn bench_empty_level(c: &mut Criterion) {
  let sdf = generate_sphere_sdf(32, 12.0);
  let volume = Volume::new(&sdf, [32, 32, 32]).expect("valid shape");

  c.bench_function("marching_cubes_empty_level (32³)", |b| {
    b.iter(|| black_box(extract_isosurface_3d(black_box(&volume), 1000.0)))
  });
}

/// Padded batch extraction, parallel vs sequential items.
fn bench_batch(c: &mut Criterion) {
  let side = 32;
  let items = 8;
  let mut sdf = Vec::with_capacity(items * side * side * side);
  for item in 0..items {
    sdf.extend(generate_sphere_sdf(side, 6.0 + item as f32));
  }
  let batch = VolumeBatch::new(&sdf, items, [side, side, side]).expect("valid shape");

  let mut group = c.benchmark_group("batch_padded (8 × 32³)");
  for parallel in [true, false] {
    let config = BatchConfig::new(16_384, 32_768).with_parallel(parallel);
    let extractor = BatchExtractor::new(TopologyTables::shared(), config);
    let name = if parallel { "parallel" } else { "sequential" };

    group.bench_function(name, |b| {
      b.iter(|| black_box(extractor.extract_padded(black_box(&batch), 0.0)))
    });
  }
  group.finish();
}

/// 2D contour extraction including run chaining.
fn bench_marching_squares(c: &mut Criterion) {
  let side = 256;
  let sdf = generate_circle_sdf(side, 100.0);
  let field = Field::new(&sdf, [side, side]).expect("valid shape");

  c.bench_function("marching_squares_circle (256²)", |b| {
    b.iter(|| black_box(extract_isosurface_2d(black_box(&field), 0.0)))
  });
}

criterion_group!(
  benches,
  bench_marching_cubes,
  bench_empty_level,
  bench_batch,
  bench_marching_squares
);
criterion_main!(benches);

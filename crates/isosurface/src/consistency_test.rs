//! Cross-stage properties checked over random grids.

use proptest::prelude::*;

use crate::backend::IsosurfaceBackend;
use crate::test_utils::{sphere_volume, triangle_soup, ScalarMarchingCubes};
use crate::{
  extract_isosurface_2d, extract_isosurface_3d, extract_isosurface_batch_padded, Field,
  MarchingCubes, MarchingSquares, TopologyTables, Volume, VolumeBatch,
};

/// Samples bounded away from level 0, so every crossing is strictly inside
/// its edge.
fn sample() -> BoxedStrategy<f32> {
  prop_oneof![-1.0f32..-0.05, 0.05f32..1.0].boxed()
}

/// Samples that often sit exactly on level 0.
fn tied_sample() -> BoxedStrategy<f32> {
  prop_oneof![Just(0.0f32), -1.0f32..1.0].boxed()
}

fn volume_of(sample: BoxedStrategy<f32>) -> impl Strategy<Value = ([usize; 3], Vec<f32>)> {
  (2usize..7, 2usize..7, 2usize..7).prop_flat_map(move |(nx, ny, nz)| {
    prop::collection::vec(sample.clone(), nx * ny * nz).prop_map(move |data| ([nx, ny, nz], data))
  })
}

fn field_of(sample: BoxedStrategy<f32>) -> impl Strategy<Value = ([usize; 2], Vec<f32>)> {
  (2usize..10, 2usize..10).prop_flat_map(move |(nx, ny)| {
    prop::collection::vec(sample.clone(), nx * ny).prop_map(move |data| ([nx, ny], data))
  })
}

fn volume_strategy() -> impl Strategy<Value = ([usize; 3], Vec<f32>)> {
  volume_of(sample())
}

fn tied_volume_strategy() -> impl Strategy<Value = ([usize; 3], Vec<f32>)> {
  volume_of(tied_sample())
}

fn field_strategy() -> impl Strategy<Value = ([usize; 2], Vec<f32>)> {
  field_of(sample())
}

fn tied_field_strategy() -> impl Strategy<Value = ([usize; 2], Vec<f32>)> {
  field_of(tied_sample())
}

/// Canonical `(x, y, z, axis)` address of a vertex strictly inside its edge.
fn edge_address(vertex: &[f32; 3]) -> ([u32; 3], usize) {
  let axis = (0..3).find(|&a| vertex[a].fract() != 0.0).unwrap();
  (vertex.map(|c| c.floor() as u32), axis)
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn empty_outside_sample_range((shape, data) in volume_strategy(), above in any::<bool>()) {
    let volume = Volume::new(&data, shape).unwrap();
    let level = if above { 1.5 } else { -1.5 };
    let mesh = extract_isosurface_3d(&volume, level).unwrap();
    prop_assert!(mesh.is_empty());
  }

  #[test]
  fn indices_in_range_and_every_vertex_used((shape, data) in tied_volume_strategy()) {
    let volume = Volume::new(&data, shape).unwrap();
    let mesh = extract_isosurface_3d(&volume, 0.0).unwrap();

    let mut used = vec![false; mesh.vertex_count()];
    for &index in mesh.faces.iter().flatten() {
      prop_assert!((index as usize) < mesh.vertex_count());
      used[index as usize] = true;
    }
    prop_assert!(used.iter().all(|&u| u));
  }

  #[test]
  fn vertex_ids_follow_edge_order((shape, data) in volume_strategy()) {
    let volume = Volume::new(&data, shape).unwrap();
    let mesh = extract_isosurface_3d(&volume, 0.0).unwrap();
    let addresses: Vec<_> = mesh.vertices.iter().map(edge_address).collect();
    // Strictly increasing: ordered by address and no edge numbered twice
    prop_assert!(addresses.windows(2).all(|pair| pair[0] < pair[1]));
  }

  #[test]
  fn matches_scalar_reference((shape, data) in volume_strategy()) {
    assert_matches_scalar_reference(shape, &data)?;
  }

  #[test]
  fn matches_scalar_reference_with_samples_on_level((shape, data) in tied_volume_strategy()) {
    assert_matches_scalar_reference(shape, &data)?;
  }

  #[test]
  fn identical_across_thread_counts((shape, data) in volume_strategy()) {
    let volume = Volume::new(&data, shape).unwrap();
    let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

    let a = single.install(|| extract_isosurface_3d(&volume, 0.0)).unwrap();
    let b = many.install(|| extract_isosurface_3d(&volume, 0.0)).unwrap();
    prop_assert_eq!(a, b);
  }

  #[test]
  fn contour_runs_cover_every_vertex((shape, data) in field_strategy()) {
    assert_runs_cover_every_vertex(shape, &data)?;
  }

  #[test]
  fn contour_runs_cover_every_vertex_with_samples_on_level((shape, data) in tied_field_strategy()) {
    assert_runs_cover_every_vertex(shape, &data)?;
  }

  #[test]
  fn padded_batch_matches_direct_extraction(
    (shape, first) in volume_strategy(),
    seed in prop::collection::vec(sample(), 216),
  ) {
    let len = shape.iter().product::<usize>();
    let mut data = first;
    data.extend_from_slice(&seed[..len]);
    let batch = VolumeBatch::new(&data, 2, shape).unwrap();

    let padded = extract_isosurface_batch_padded(&batch, 0.0, 1024, 1024).unwrap();
    for index in 0..2 {
      let direct = extract_isosurface_3d(&batch.item(index).unwrap(), 0.0).unwrap();
      prop_assert_eq!(padded.unpad(index), Some(direct));
    }
  }
}

fn assert_matches_scalar_reference(shape: [usize; 3], data: &[f32]) -> Result<(), TestCaseError> {
  let volume = Volume::new(data, shape).unwrap();
  let whole_array = MarchingCubes::new(TopologyTables::shared()).extract(&volume, 0.0).unwrap();
  let reference = ScalarMarchingCubes.extract(&volume, 0.0).unwrap();

  prop_assert_eq!(whole_array.vertex_count(), reference.vertex_count());
  prop_assert_eq!(triangle_soup(&whole_array), triangle_soup(&reference));
  Ok(())
}

/// Every cut-edge vertex appears in exactly one run, loops once more at
/// their end. Positions may coincide, so runs are checked by count.
fn assert_runs_cover_every_vertex(shape: [usize; 2], data: &[f32]) -> Result<(), TestCaseError> {
  let field = Field::new(data, shape).unwrap();
  let (vertices, _) = MarchingSquares::new(TopologyTables::shared())
    .extract_segments(&field, 0.0)
    .unwrap();
  let contours = extract_isosurface_2d(&field, 0.0).unwrap();

  prop_assert_eq!(contours.lengths.len(), contours.closed.len());
  let total: u32 = contours.lengths.iter().sum();
  prop_assert_eq!(total as usize, contours.vertices.len());

  let mut distinct = 0;
  for (index, run) in contours.iter().enumerate() {
    if contours.is_closed(index) {
      prop_assert!(run.len() >= 4);
      prop_assert_eq!(run.first(), run.last());
      distinct += run.len() - 1;
    } else {
      prop_assert!(run.len() >= 2);
      distinct += run.len();
    }
  }
  prop_assert_eq!(distinct, vertices.len());
  Ok(())
}

#[test]
fn test_overflow_by_one_vertex() {
  let side = 9;
  let data = sphere_volume(side, 3.0);
  let batch = VolumeBatch::new(&data, 1, [side, side, side]).unwrap();
  let mesh = extract_isosurface_3d(&batch.item(0).unwrap(), 0.0).unwrap();
  let nv = mesh.vertex_count() as u32;
  let nf = mesh.face_count() as u32;

  let err = extract_isosurface_batch_padded(&batch, 0.0, nv - 1, nf).unwrap_err();
  assert!(matches!(err, crate::ExtractError::PaddingOverflow { item: 0, .. }));

  let padded = extract_isosurface_batch_padded(&batch, 0.0, nv, nf).unwrap();
  assert_eq!(padded.unpad(0), Some(mesh));
}

#[test]
fn test_repeated_calls_are_identical() {
  let side = 16;
  let data = sphere_volume(side, 5.5);
  let volume = Volume::new(&data, [side, side, side]).unwrap();
  let first = extract_isosurface_3d(&volume, 0.0).unwrap();
  for _ in 0..3 {
    assert_eq!(extract_isosurface_3d(&volume, 0.0).unwrap(), first);
  }
}

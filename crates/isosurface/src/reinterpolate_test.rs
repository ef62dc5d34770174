use super::*;
use crate::grid::{Field, Volume};
use crate::test_utils::sphere_volume;
use crate::extract_isosurface_3d;

#[test]
fn test_recovers_extracted_vertices() {
  let side = 10;
  let data = sphere_volume(side, 3.3);
  let volume = Volume::new(&data, [side, side, side]).unwrap();
  let mesh = extract_isosurface_3d(&volume, 0.0).unwrap();
  let again = reinterpolate_vertices(&mesh.vertices, &volume, 0.0).unwrap();

  assert_eq!(again.len(), mesh.vertex_count());
  for (a, b) in again.iter().zip(&mesh.vertices) {
    for axis in 0..3 {
      assert!((a[axis] - b[axis]).abs() < 1e-5, "{:?} vs {:?}", a, b);
    }
  }
}

#[test]
fn test_tracks_level_change() {
  // Field value equals x: the crossing moves with the level
  let data = [0.0f32, 0.0, 1.0, 1.0];
  let field = Field::new(&data, [2, 2]).unwrap();
  let out = reinterpolate_vertices(&[[0.5, 0.0]], &field, 0.25).unwrap();
  assert_eq!(out, vec![[0.25, 0.0]]);
}

#[test]
fn test_fraction_is_clamped() {
  let data = [0.0f32, 0.0, 1.0, 1.0];
  let field = Field::new(&data, [2, 2]).unwrap();
  let out = reinterpolate_vertices(&[[0.5, 1.0]], &field, 2.0).unwrap();
  assert_eq!(out, vec![[1.0, 1.0]]);
}

#[test]
fn test_grid_point_is_unchanged() {
  let data = [0.0f32, 0.0, 1.0, 1.0];
  let field = Field::new(&data, [2, 2]).unwrap();
  let out = reinterpolate_vertices(&[[1.0, 0.0]], &field, 0.5).unwrap();
  assert_eq!(out, vec![[1.0, 0.0]]);
}

#[test]
fn test_flat_edge_snaps_to_floor() {
  // Both ends of the y edge at x = 0 hold 0.0
  let data = [0.0f32, 0.0, 1.0, 1.0];
  let field = Field::new(&data, [2, 2]).unwrap();
  let out = reinterpolate_vertices(&[[0.0, 0.75]], &field, 0.5).unwrap();
  assert_eq!(out, vec![[0.0, 0.0]]);
}

#[test]
fn test_outside_grid_is_rejected() {
  let data = [0.0f32, 0.0, 1.0, 1.0];
  let field = Field::new(&data, [2, 2]).unwrap();
  let vertices = [[0.5, 0.0], [1.5, 0.0], [f32::NAN, 0.0]];
  let err = reinterpolate_vertices(&vertices, &field, 0.5).unwrap_err();
  assert_eq!(err, ExtractError::VertexOutsideGrid { index: 1 });
}

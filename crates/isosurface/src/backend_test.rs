use super::*;
use crate::tables::TopologyTables;
use crate::test_utils::{sphere_volume, triangle_soup, ScalarMarchingCubes};

#[test]
fn test_backends_agree_on_sphere() {
  let side = 12;
  let data = sphere_volume(side, 4.2);
  let volume = Volume::new(&data, [side, side, side]).unwrap();

  let cubes = MarchingCubes::new(TopologyTables::shared());
  let backends: [&dyn IsosurfaceBackend; 2] = [&cubes, &ScalarMarchingCubes];
  let meshes: Vec<Mesh> = backends
    .iter()
    .map(|backend| backend.extract(&volume, 0.0).unwrap())
    .collect();

  assert_eq!(meshes[0].vertex_count(), meshes[1].vertex_count());
  assert_eq!(meshes[0].face_count(), meshes[1].face_count());
  assert_eq!(triangle_soup(&meshes[0]), triangle_soup(&meshes[1]));
}

#[test]
fn test_backend_names() {
  let cubes = MarchingCubes::new(TopologyTables::shared());
  assert_eq!(IsosurfaceBackend::name(&cubes), "marching_cubes");
  assert_eq!(ScalarMarchingCubes.name(), "scalar_reference");
}

//! Test utilities for extraction tests.
//!
//! Provides synthetic fields and a scalar per-cell reference backend for
//! cross-checking the whole-array stages.

use std::collections::HashMap;

use crate::backend::IsosurfaceBackend;
use crate::constants::CUBE_CORNERS;
use crate::edge_table::CUBE_EDGE_SHIFTS;
use crate::error::Result;
use crate::grid::Volume;
use crate::tri_table::{row_len, TRI_TABLE};
use crate::types::Mesh;

// =============================================================================
// Synthetic Fields
// =============================================================================

/// `distance - radius` around the center of a `side`³ grid.
pub fn sphere_volume(side: usize, radius: f32) -> Vec<f32> {
  let center = (side - 1) as f32 / 2.0;
  let mut data = Vec::with_capacity(side * side * side);
  for x in 0..side {
    for y in 0..side {
      for z in 0..side {
        let d = [x, y, z].map(|c| c as f32 - center);
        data.push((d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() - radius);
      }
    }
  }
  data
}

/// `distance - radius` around the center of a `side`² grid.
pub fn sphere_field(side: usize, radius: f32) -> Vec<f32> {
  let center = (side - 1) as f32 / 2.0;
  let mut data = Vec::with_capacity(side * side);
  for x in 0..side {
    for y in 0..side {
      let (dx, dy) = (x as f32 - center, y as f32 - center);
      data.push((dx * dx + dy * dy).sqrt() - radius);
    }
  }
  data
}

/// 2×2×2 volume with only point `(1, 1, 1)` above level 0.
pub fn single_corner_volume() -> Vec<f32> {
  let mut data = vec![-1.0; 8];
  data[7] = 1.0;
  data
}

/// Triangles as sorted position triples, for order-independent comparison.
pub fn triangle_soup(mesh: &Mesh) -> Vec<[[u32; 3]; 3]> {
  let mut soup: Vec<[[u32; 3]; 3]> = mesh
    .faces
    .iter()
    .map(|face| face.map(|i| mesh.vertices[i as usize].map(f32::to_bits)))
    .collect();
  soup.sort_unstable();
  soup
}

// =============================================================================
// Scalar Reference Backend
// =============================================================================

/// Classic per-cell Marching Cubes loop.
///
/// Vertices are deduplicated through a hash map keyed by edge address, in
/// first-discovery order, so vertex numbering differs from the whole-array
/// extractor while the geometry is identical.
pub struct ScalarMarchingCubes;

impl IsosurfaceBackend for ScalarMarchingCubes {
  fn name(&self) -> &'static str {
    "scalar_reference"
  }

  fn extract(&self, volume: &Volume<'_>, level: f32) -> Result<Mesh> {
    let layout = volume.layout();
    let [nx, ny, nz] = volume.shape();
    let data = volume.data();
    let strides = layout.strides();

    let mut mesh = Mesh::new();
    let mut ids: HashMap<(usize, u8), u32> = HashMap::new();

    for x in 0..nx - 1 {
      for y in 0..ny - 1 {
        for z in 0..nz - 1 {
          let mut code = 0usize;
          for (bit, corner) in CUBE_CORNERS.iter().enumerate() {
            let p = [x + corner[0] as usize, y + corner[1] as usize, z + corner[2] as usize];
            if data[layout.ravel(p)] < level {
              code |= 1 << bit;
            }
          }

          let row = &TRI_TABLE[code];
          for triangle in row[..row_len(row)].chunks_exact(3) {
            let mut face = [0u32; 3];
            for (slot, &edge) in triangle.iter().enumerate() {
              let shift = CUBE_EDGE_SHIFTS[edge as usize];
              let p = [
                x + shift.offset[0] as usize,
                y + shift.offset[1] as usize,
                z + shift.offset[2] as usize,
              ];
              let point = layout.ravel(p);
              let axis = shift.axis;
              let next = mesh.vertices.len() as u32;
              face[slot] = *ids.entry((point, axis)).or_insert_with(|| {
                let v1 = data[point];
                let v2 = data[point + strides[axis as usize]];
                let mut vertex = p.map(|c| c as f32);
                vertex[axis as usize] += (level - v1) / (v2 - v1);
                mesh.vertices.push(vertex);
                next
              });
            }
            mesh.faces.push(face);
          }
        }
      }
    }

    Ok(mesh)
  }
}

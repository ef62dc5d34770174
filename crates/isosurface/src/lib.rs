//! isosurface - Table-driven isosurface extraction on regular grids
//!
//! This crate extracts triangle meshes (3D) and contour polylines (2D) from
//! scalar fields sampled on a dense rectilinear grid. The implementation is
//! the classic Marching Cubes / Marching Squares lookup-table algorithm, but
//! every stage runs as a whole-array pass instead of a per-cell loop with
//! data-dependent work:
//!
//! - **Cell classification**: the "below level" mask is shifted once per cell
//!   corner and summed into a configuration code per cell
//! - **Edge cut resolution**: every cell's cut-edge bits are accumulated onto
//!   one canonical `(grid point, axis)` slot per physical edge, then slots are
//!   numbered in lexicographic order
//! - **Vertex interpolation**: one linear crossing per numbered edge, batched
//!   per axis
//! - **Face assembly**: cells are bucketed by triangle count so every gather
//!   has a fixed width
//!
//! Output ordering depends only on the grid and the level, never on how many
//! rayon workers executed the passes.
//!
//! # Example
//!
//! ```ignore
//! use isosurface::{extract_isosurface_3d, Volume};
//!
//! let n = 32;
//! let data: Vec<f32> = (0..n * n * n)
//!     .map(|i| {
//!         let (x, y, z) = (i / (n * n), (i / n) % n, i % n);
//!         let d = [x, y, z].map(|c| c as f32 - 16.0);
//!         (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() - 10.0
//!     })
//!     .collect();
//!
//! let volume = Volume::new(&data, [n, n, n])?;
//! let mesh = extract_isosurface_3d(&volume, 0.0)?;
//!
//! println!("Generated {} vertices, {} triangles",
//!     mesh.vertex_count(), mesh.face_count());
//! ```

pub mod constants;
pub mod edge_table;
pub mod error;
pub mod grid;
pub mod layout;
pub mod tri_table;
pub mod types;

// Re-export commonly used items
pub use constants::{PAD_FACE, PAD_VERTEX};
pub use error::{ExtractError, Result};
pub use grid::{Field, Grid, Volume, VolumeBatch};
pub use layout::GridLayout;
pub use types::{
  BatchConfig, Contours, DegenerateEdgePolicy, ExtractConfig, Mesh, MinMaxAABB,
};

// Precomputed lookup tables shared by every extraction call
pub mod tables;
pub use tables::{
  CellTopology, CubeTables, EdgeShift, FaceShiftTable, SquareTables, TopologyTables,
};

// Whole-array extraction stages
pub mod extract;
pub use extract::{MarchingCubes, MarchingSquares};

// Fixed-size padded extraction over volume collections
pub mod batch;
pub use batch::{BatchExtractor, PaddedBatch};

// Vertex re-interpolation against the source field
pub mod reinterpolate;
pub use reinterpolate::reinterpolate_vertices;

// Interchangeable extraction backends
pub mod backend;
pub use backend::IsosurfaceBackend;

// Extraction statistics
pub mod metrics;

/// Return the process-wide topology tables, building them on first use.
pub fn build_topology_tables() -> &'static TopologyTables {
  TopologyTables::shared()
}

/// Extract a triangle mesh from a 3D volume at `level`.
///
/// Vertices are grid-fractional `(x, y, z)` coordinates; faces index into
/// the returned vertex list.
pub fn extract_isosurface_3d(volume: &Volume<'_>, level: f32) -> Result<Mesh> {
  MarchingCubes::new(TopologyTables::shared()).extract(volume, level)
}

/// Extract contour runs from a 2D field at `level`.
pub fn extract_isosurface_2d(field: &Field<'_>, level: f32) -> Result<Contours> {
  MarchingSquares::new(TopologyTables::shared()).extract(field, level)
}

/// Extract one unpadded mesh per batch item.
pub fn extract_isosurface_batch(batch: &VolumeBatch<'_>, level: f32) -> Result<Vec<Mesh>> {
  BatchExtractor::new(TopologyTables::shared(), BatchConfig::default()).extract(batch, level)
}

/// Extract every batch item into fixed-size, sentinel-padded buffers.
///
/// Fails with [`ExtractError::PaddingOverflow`] instead of truncating when an
/// item needs more than `max_vertices` vertices or `max_faces` faces.
pub fn extract_isosurface_batch_padded(
  batch: &VolumeBatch<'_>,
  level: f32,
  max_vertices: u32,
  max_faces: u32,
) -> Result<PaddedBatch> {
  let config = BatchConfig::new(max_vertices, max_faces);
  BatchExtractor::new(TopologyTables::shared(), config).extract_padded(batch, level)
}

#[cfg(test)]
mod test_utils;

#[cfg(test)]
#[path = "consistency_test.rs"]
mod consistency_test;

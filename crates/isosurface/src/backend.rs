//! Interchangeable isosurface backends.
//!
//! A backend is an opaque `(volume, level) -> mesh` function. The whole-array
//! [`MarchingCubes`] extractor is one; per-cell implementations used for
//! cross-checking or benchmarking can implement the same trait.
//!
//! # Usage
//!
//! ```ignore
//! use isosurface::{IsosurfaceBackend, MarchingCubes, TopologyTables, Volume};
//!
//! fn extract_all(backends: &[&dyn IsosurfaceBackend], volume: &Volume) {
//!     for backend in backends {
//!         let mesh = backend.extract(volume, 0.0)?;
//!         println!("{}: {} faces", backend.name(), mesh.face_count());
//!     }
//! }
//! ```

use crate::error::Result;
use crate::extract::MarchingCubes;
use crate::grid::Volume;
use crate::tables::CellTopology;
use crate::types::Mesh;

/// A 3D isosurface extraction strategy.
pub trait IsosurfaceBackend: Send + Sync {
  /// Short identifier for reports.
  fn name(&self) -> &'static str;

  /// Extract the mesh of `volume` at `level`.
  fn extract(&self, volume: &Volume<'_>, level: f32) -> Result<Mesh>;
}

impl<T: CellTopology<3>> IsosurfaceBackend for MarchingCubes<'_, T> {
  fn name(&self) -> &'static str {
    "marching_cubes"
  }

  fn extract(&self, volume: &Volume<'_>, level: f32) -> Result<Mesh> {
    MarchingCubes::extract(self, volume, level)
  }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

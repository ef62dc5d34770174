//! Whole-array Marching Cubes and Marching Squares.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid: &[f32]            - C-ordered samples (Nx, Ny[, Nz])     │
//! │  level: f32              - inside means value < level           │
//! │  topology: CellTopology  - edge, shift and bucket tables        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    STAGE 1: Classification                      │
//! │  below-level mask, shifted per corner, summed into cell codes   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    STAGE 2: Cut Edges                           │
//! │  mark canonical (point, axis) slots, number them in slot order  │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    STAGE 3: Interpolation                       │
//! │  one linear crossing per numbered edge, batched per axis        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    STAGE 4: Assembly                            │
//! │  fixed-width gathers per primitive-count bucket                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  3D: Mesh { vertices, faces }                                   │
//! │  2D: Contours { vertices, lengths } (segments chained)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All scratch (codes, slots, addresses) is allocated per call, so an
//! extractor can be shared freely between threads.

mod assemble;
mod classify;
mod contour;
mod cut_edges;
mod interpolate;

use crate::error::{ExtractError, Result};
use crate::grid::{Field, Grid, Volume};
use crate::tables::{CellTopology, CubeTables, SquareTables, TopologyTables};
use crate::types::{Contours, DegenerateEdgePolicy, ExtractConfig, Mesh};

/// Raw stage output: vertex positions plus flat primitive indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Extraction<const D: usize> {
  pub vertices: Vec<[f32; D]>,
  pub indices: Vec<u32>,
}

/// Run every stage over `grid`.
pub(crate) fn run<const D: usize, T: CellTopology<D>>(
  topology: &T,
  grid: &Grid<'_, D>,
  level: f32,
  config: &ExtractConfig,
) -> Result<Extraction<D>> {
  if config.level_fast_path {
    // Skipped when NaN is present: NaN edges still produce vertices
    if let Some((min, max)) = grid.value_range() {
      if level < min || level > max {
        #[cfg(feature = "tracing")]
        tracing::debug!(level, min, max, "level outside sample range");
        return Ok(Extraction::default());
      }
    }
  }

  let codes = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("classify").entered();
    classify::classify(topology, grid, level)
  };

  let cut_edges = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("resolve_cut_edges").entered();
    cut_edges::CutEdges::resolve(topology, *grid.layout(), &codes)
  };

  let addresses = cut_edges.addresses();
  debug_assert_eq!(addresses.len(), cut_edges.count());

  if config.degenerate_edges == DegenerateEdgePolicy::Reject {
    if let Some((address, v1, v2)) = interpolate::find_degenerate(grid, &addresses, level) {
      return Err(ExtractError::DegenerateEdge {
        point: grid.layout().unravel(address.point).to_vec(),
        axis: address.axis as usize,
        v1,
        v2,
      });
    }
  }

  let vertices = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("interpolate").entered();
    interpolate::interpolate(grid, &addresses, level)
  };

  let indices = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("assemble").entered();
    assemble::assemble(topology, &codes, &cut_edges)
  };

  #[cfg(feature = "tracing")]
  tracing::debug!(
    cells = codes.codes().len(),
    vertices = vertices.len(),
    primitives = indices.len() / T::ARITY,
    "extracted"
  );

  Ok(Extraction { vertices, indices })
}

/// Marching Cubes over 3D volumes.
///
/// Borrows its tables; build one per call site or keep it around, it holds
/// no scratch state.
#[derive(Clone, Debug)]
pub struct MarchingCubes<'t, T = CubeTables> {
  topology: &'t T,
  config: ExtractConfig,
}

impl<'t> MarchingCubes<'t, CubeTables> {
  pub fn new(tables: &'t TopologyTables) -> Self {
    Self::with_topology(&tables.cube)
  }
}

impl<'t, T: CellTopology<3>> MarchingCubes<'t, T> {
  /// Use a custom table set.
  pub fn with_topology(topology: &'t T) -> Self {
    Self {
      topology,
      config: ExtractConfig::default(),
    }
  }

  pub fn with_config(mut self, config: ExtractConfig) -> Self {
    self.config = config;
    self
  }

  pub fn config(&self) -> &ExtractConfig {
    &self.config
  }

  /// Extract the triangle mesh of `volume` at `level`.
  ///
  /// Vertices are numbered by the `(x, y, z, axis)` order of their edges;
  /// faces are grouped by how many triangles their cell emits, then by cell
  /// order.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_cubes::extract"))]
  pub fn extract(&self, volume: &Volume<'_>, level: f32) -> Result<Mesh> {
    let Extraction { vertices, indices } = run(self.topology, volume, level, &self.config)?;
    let faces = indices
      .chunks_exact(3)
      .map(|face| [face[0], face[1], face[2]])
      .collect();
    Ok(Mesh { vertices, faces })
  }
}

/// Marching Squares over 2D fields.
#[derive(Clone, Debug)]
pub struct MarchingSquares<'t, T = SquareTables> {
  topology: &'t T,
  config: ExtractConfig,
}

impl<'t> MarchingSquares<'t, SquareTables> {
  pub fn new(tables: &'t TopologyTables) -> Self {
    Self::with_topology(&tables.square)
  }
}

impl<'t, T: CellTopology<2>> MarchingSquares<'t, T> {
  /// Use a custom table set.
  pub fn with_topology(topology: &'t T) -> Self {
    Self {
      topology,
      config: ExtractConfig::default(),
    }
  }

  pub fn with_config(mut self, config: ExtractConfig) -> Self {
    self.config = config;
    self
  }

  pub fn config(&self) -> &ExtractConfig {
    &self.config
  }

  /// Vertices and raw segments (flat id pairs) of `field` at `level`.
  pub fn extract_segments(&self, field: &Field<'_>, level: f32) -> Result<(Vec<[f32; 2]>, Vec<u32>)> {
    let Extraction { vertices, indices } = run(self.topology, field, level, &self.config)?;
    Ok((vertices, indices))
  }

  /// Extract contour runs of `field` at `level`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_squares::extract"))]
  pub fn extract(&self, field: &Field<'_>, level: f32) -> Result<Contours> {
    let (vertices, segments) = self.extract_segments(field, level)?;

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("chain_contours").entered();
    Ok(contour::chain(&vertices, &segments))
  }
}

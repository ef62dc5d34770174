//! Batched extraction with fixed-size padded output.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Batch Extraction                                                        │
//! │                                                                         │
//! │  VolumeBatch { B volumes of one shape }                                 │
//! │           │                                                             │
//! │           ▼  (rayon, one fresh scratch set per item)                    │
//! │  ┌─────────────────────────────────────────────────────────┐            │
//! │  │ MarchingCubes::extract(&item, level)                    │            │
//! │  │ → Mesh { vertices, faces } + timing_us                  │            │
//! │  └─────────────────────────────────────────────────────────┘            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PaddedBatch                                                            │
//! │    vertices [B × max_vertices × 3]   rows ≥ nv[b] hold PAD_VERTEX       │
//! │    faces    [B × max_faces × 3]      rows ≥ nf[b] hold PAD_FACE         │
//! │    nv, nf, timing_us [B]                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Face indices are local to their item. An item that does not fit its
//! padding fails the whole call; output is never truncated.

use rayon::prelude::*;
use web_time::Instant;

use crate::constants::{PAD_FACE, PAD_VERTEX};
use crate::error::{ExtractError, Result};
use crate::extract::MarchingCubes;
use crate::grid::{Volume, VolumeBatch};
use crate::tables::TopologyTables;
use crate::types::{BatchConfig, Mesh};

/// Padded per-item meshes plus their true sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedBatch {
  /// Vertex rows per item.
  pub max_vertices: u32,

  /// Face rows per item.
  pub max_faces: u32,

  /// `len() * max_vertices` rows, item-major.
  pub vertices: Vec<[f32; 3]>,

  /// `len() * max_faces` rows, item-major.
  pub faces: Vec<[i32; 3]>,

  /// True vertex count per item.
  pub nv: Vec<u32>,

  /// True face count per item.
  pub nf: Vec<u32>,

  /// Extraction time per item in microseconds.
  pub timing_us: Vec<u64>,
}

impl PaddedBatch {
  /// Number of items.
  pub fn len(&self) -> usize {
    self.nv.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nv.is_empty()
  }

  /// All `max_vertices` rows of item `index`, padding included, or `None`
  /// past the end.
  pub fn item_vertices(&self, index: usize) -> Option<&[[f32; 3]]> {
    if index >= self.len() {
      return None;
    }
    let rows = self.max_vertices as usize;
    self.vertices.get(index * rows..(index + 1) * rows)
  }

  /// All `max_faces` rows of item `index`, padding included, or `None` past
  /// the end.
  pub fn item_faces(&self, index: usize) -> Option<&[[i32; 3]]> {
    if index >= self.len() {
      return None;
    }
    let rows = self.max_faces as usize;
    self.faces.get(index * rows..(index + 1) * rows)
  }

  /// Item `index` with padding stripped, or `None` past the end.
  pub fn unpad(&self, index: usize) -> Option<Mesh> {
    let nv = *self.nv.get(index)? as usize;
    let nf = *self.nf.get(index)? as usize;
    Some(Mesh {
      vertices: self.item_vertices(index)?.get(..nv)?.to_vec(),
      faces: self
        .item_faces(index)?
        .get(..nf)?
        .iter()
        .map(|face| face.map(|i| i as u32))
        .collect(),
    })
  }
}

/// Extracts every volume of a batch with shared tables and level.
#[derive(Clone, Debug)]
pub struct BatchExtractor<'t> {
  tables: &'t TopologyTables,
  config: BatchConfig,
}

impl<'t> BatchExtractor<'t> {
  pub fn new(tables: &'t TopologyTables, config: BatchConfig) -> Self {
    Self { tables, config }
  }

  pub fn config(&self) -> &BatchConfig {
    &self.config
  }

  /// One unpadded mesh per item, in batch order.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "batch::extract"))]
  pub fn extract(&self, batch: &VolumeBatch<'_>, level: f32) -> Result<Vec<Mesh>> {
    self
      .run_items(batch, level)
      .into_iter()
      .map(|item| item.map(|(mesh, _)| mesh))
      .collect()
  }

  /// Every item copied into fixed-size buffers of the configured capacity.
  ///
  /// Fails with [`ExtractError::PaddingOverflow`] naming the first item (in
  /// batch order) that needs more rows than configured.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "batch::extract_padded"))]
  pub fn extract_padded(&self, batch: &VolumeBatch<'_>, level: f32) -> Result<PaddedBatch> {
    let max_vertices = self.config.max_vertices;
    let max_faces = self.config.max_faces;

    if max_vertices > i32::MAX as u32 {
      return Err(ExtractError::InvalidBatchConfig {
        reason: "max_vertices exceeds the i32 face index range",
      });
    }
    let vertex_rows = batch
      .len()
      .checked_mul(max_vertices as usize)
      .ok_or(ExtractError::InvalidBatchConfig {
        reason: "padded vertex buffer size overflows usize",
      })?;
    let face_rows = batch
      .len()
      .checked_mul(max_faces as usize)
      .ok_or(ExtractError::InvalidBatchConfig {
        reason: "padded face buffer size overflows usize",
      })?;

    let items = self
      .run_items(batch, level)
      .into_iter()
      .collect::<Result<Vec<_>>>()?;

    for (item, (mesh, _)) in items.iter().enumerate() {
      if mesh.vertex_count() > max_vertices as usize || mesh.face_count() > max_faces as usize {
        #[cfg(feature = "tracing")]
        tracing::warn!(
          item,
          vertices = mesh.vertex_count(),
          faces = mesh.face_count(),
          max_vertices,
          max_faces,
          "batch item overflows padding"
        );
        return Err(ExtractError::PaddingOverflow {
          item,
          vertices: mesh.vertex_count(),
          max_vertices,
          faces: mesh.face_count(),
          max_faces,
        });
      }
    }

    let mut padded = PaddedBatch {
      max_vertices,
      max_faces,
      vertices: vec![[PAD_VERTEX; 3]; vertex_rows],
      faces: vec![[PAD_FACE; 3]; face_rows],
      nv: Vec::with_capacity(items.len()),
      nf: Vec::with_capacity(items.len()),
      timing_us: Vec::with_capacity(items.len()),
    };

    for (index, (mesh, timing_us)) in items.into_iter().enumerate() {
      let vertex_start = index * max_vertices as usize;
      padded.vertices[vertex_start..vertex_start + mesh.vertex_count()]
        .copy_from_slice(&mesh.vertices);

      let face_start = index * max_faces as usize;
      for (row, face) in padded.faces[face_start..face_start + mesh.face_count()]
        .iter_mut()
        .zip(&mesh.faces)
      {
        *row = face.map(|i| i as i32);
      }

      padded.nv.push(mesh.vertex_count() as u32);
      padded.nf.push(mesh.face_count() as u32);
      padded.timing_us.push(timing_us);
    }

    Ok(padded)
  }

  /// Extract and time every item. Results keep batch order.
  fn run_items(&self, batch: &VolumeBatch<'_>, level: f32) -> Vec<Result<(Mesh, u64)>> {
    let extractor = MarchingCubes::new(self.tables).with_config(self.config.extract.clone());
    let extract_item = |volume: Volume<'_>| -> Result<(Mesh, u64)> {
      let start = Instant::now();
      let mesh = extractor.extract(&volume, level)?;
      Ok((mesh, start.elapsed().as_micros() as u64))
    };

    if self.config.parallel {
      (0..batch.len())
        .into_par_iter()
        .filter_map(|index| batch.item(index))
        .map(extract_item)
        .collect()
    } else {
      batch.iter().map(extract_item).collect()
    }
  }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;

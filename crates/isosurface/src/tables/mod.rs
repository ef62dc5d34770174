//! Topology tables shared by every extraction call.
//!
//! The classic edge and triangle tables are regrouped once into fixed-width
//! bucket tables, one per primitive count, so face assembly never handles a
//! ragged row:
//!
//! ```text
//! TRI_TABLE[code] = [e0 e1 e2 | e3 e4 e5 | -1 ...]      (2 triangles)
//!
//! buckets[1].row(code) = [shift(e0) shift(e1) shift(e2) shift(e3) shift(e4) shift(e5)]
//! buckets[c].row(code) = [shift(0); c * 3]              for every other bucket c
//! ```
//!
//! Rows of codes that do not belong to a bucket are filled with edge 0's
//! address, which is in range for every cell. They are never selected.
//!
//! Tables depend only on corner and edge numbering, never on data. They are
//! built by [`TopologyTables::build`] and cached process-wide by
//! [`TopologyTables::shared`]; extractors borrow them as an explicit context
//! so tests can substitute their own [`CellTopology`].

use std::sync::OnceLock;

use crate::constants::{
  CUBE_CODES, CUBE_CORNERS, MAX_SEGMENTS_PER_CELL, MAX_TRIANGLES_PER_CELL, SQUARE_CODES,
  SQUARE_CORNERS,
};
pub use crate::edge_table::EdgeShift;
use crate::edge_table::{CUBE_EDGE_SHIFTS, CUBE_EDGE_TABLE, SQUARE_EDGE_SHIFTS, SQUARE_EDGE_TABLE};
use crate::tri_table::{row_len, SEGMENT_TABLE, TRI_TABLE};

/// Per-dimension lookup tables consumed by the extraction stages.
pub trait CellTopology<const D: usize>: Send + Sync {
  /// Vertices per emitted primitive (3 for triangles, 2 for segments).
  const ARITY: usize;

  /// Corner offsets indexed by configuration bit.
  fn corners(&self) -> &[[u8; D]];

  /// Canonical address of each local edge.
  fn edge_shifts(&self) -> &[EdgeShift<D>];

  /// Bit mask of local edges cut under configuration `code`.
  fn edge_mask(&self, code: u8) -> u16;

  /// Number of primitives configuration `code` emits.
  fn primitive_count(&self, code: u8) -> u8;

  /// Fixed-width shift tables; `buckets()[c - 1]` serves cells emitting `c`
  /// primitives.
  fn buckets(&self) -> &[FaceShiftTable<D>];
}

/// Edge addresses of every primitive vertex, for cells emitting exactly
/// `primitives` primitives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceShiftTable<const D: usize> {
  primitives: usize,
  arity: usize,
  shifts: Vec<EdgeShift<D>>,
}

impl<const D: usize> FaceShiftTable<D> {
  /// Primitive count served by this bucket.
  pub fn primitives(&self) -> usize {
    self.primitives
  }

  /// Edge addresses per row (`primitives * arity`).
  pub fn width(&self) -> usize {
    self.primitives * self.arity
  }

  /// Addresses for configuration `code`, primitive-major.
  #[inline]
  pub fn row(&self, code: u8) -> &[EdgeShift<D>] {
    let width = self.width();
    let start = code as usize * width;
    &self.shifts[start..start + width]
  }
}

/// Marching Cubes tables.
#[derive(Clone, Debug)]
pub struct CubeTables {
  edge_table: [u16; CUBE_CODES],
  face_counts: [u8; CUBE_CODES],
  buckets: Vec<FaceShiftTable<3>>,
}

impl CubeTables {
  pub fn build() -> Self {
    let (face_counts, buckets) =
      build_buckets(&TRI_TABLE, 3, MAX_TRIANGLES_PER_CELL, &CUBE_EDGE_SHIFTS);
    Self {
      edge_table: CUBE_EDGE_TABLE,
      face_counts,
      buckets,
    }
  }

  /// Triangles per configuration code.
  pub fn face_counts(&self) -> &[u8; CUBE_CODES] {
    &self.face_counts
  }
}

impl CellTopology<3> for CubeTables {
  const ARITY: usize = 3;

  fn corners(&self) -> &[[u8; 3]] {
    &CUBE_CORNERS
  }

  fn edge_shifts(&self) -> &[EdgeShift<3>] {
    &CUBE_EDGE_SHIFTS
  }

  #[inline]
  fn edge_mask(&self, code: u8) -> u16 {
    self.edge_table[code as usize]
  }

  #[inline]
  fn primitive_count(&self, code: u8) -> u8 {
    self.face_counts[code as usize]
  }

  fn buckets(&self) -> &[FaceShiftTable<3>] {
    &self.buckets
  }
}

/// Marching Squares tables.
#[derive(Clone, Debug)]
pub struct SquareTables {
  edge_table: [u16; SQUARE_CODES],
  segment_counts: [u8; SQUARE_CODES],
  buckets: Vec<FaceShiftTable<2>>,
}

impl SquareTables {
  pub fn build() -> Self {
    let (segment_counts, buckets) =
      build_buckets(&SEGMENT_TABLE, 2, MAX_SEGMENTS_PER_CELL, &SQUARE_EDGE_SHIFTS);
    Self {
      edge_table: SQUARE_EDGE_TABLE,
      segment_counts,
      buckets,
    }
  }

  /// Segments per configuration code.
  pub fn segment_counts(&self) -> &[u8; SQUARE_CODES] {
    &self.segment_counts
  }
}

impl CellTopology<2> for SquareTables {
  const ARITY: usize = 2;

  fn corners(&self) -> &[[u8; 2]] {
    &SQUARE_CORNERS
  }

  fn edge_shifts(&self) -> &[EdgeShift<2>] {
    &SQUARE_EDGE_SHIFTS
  }

  #[inline]
  fn edge_mask(&self, code: u8) -> u16 {
    self.edge_table[code as usize]
  }

  #[inline]
  fn primitive_count(&self, code: u8) -> u8 {
    self.segment_counts[code as usize]
  }

  fn buckets(&self) -> &[FaceShiftTable<2>] {
    &self.buckets
  }
}

/// Cube and square tables together.
#[derive(Clone, Debug)]
pub struct TopologyTables {
  pub cube: CubeTables,
  pub square: SquareTables,
}

static SHARED_TABLES: OnceLock<TopologyTables> = OnceLock::new();

impl TopologyTables {
  /// Build fresh tables. Deterministic and infallible.
  pub fn build() -> Self {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("build_topology_tables").entered();

    Self {
      cube: CubeTables::build(),
      square: SquareTables::build(),
    }
  }

  /// Process-wide tables, built by the first caller.
  ///
  /// Concurrent first callers block until the single build finishes.
  pub fn shared() -> &'static Self {
    SHARED_TABLES.get_or_init(Self::build)
  }
}

/// Count primitives per code and regroup rows into per-count buckets.
fn build_buckets<const D: usize, const W: usize, const CODES: usize>(
  rows: &[[i8; W]; CODES],
  arity: usize,
  max_primitives: usize,
  edge_shifts: &[EdgeShift<D>],
) -> ([u8; CODES], Vec<FaceShiftTable<D>>) {
  let mut counts = [0u8; CODES];
  for (count, row) in counts.iter_mut().zip(rows.iter()) {
    *count = (row_len(row) / arity) as u8;
  }

  let buckets = (1..=max_primitives)
    .map(|primitives| {
      let width = primitives * arity;
      let mut shifts = vec![edge_shifts[0]; CODES * width];
      for (code, row) in rows.iter().enumerate() {
        if counts[code] as usize != primitives {
          continue;
        }
        for (slot, &edge) in row[..width].iter().enumerate() {
          shifts[code * width + slot] = edge_shifts[edge as usize];
        }
      }
      FaceShiftTable {
        primitives,
        arity,
        shifts,
      }
    })
    .collect();

  (counts, buckets)
}

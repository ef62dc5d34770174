//! Precomputed edge crossing tables for Marching Cubes and Marching Squares.
//!
//! Maps corner configuration codes to bit masks of the local cell edges
//! whose endpoints lie on opposite sides of the level.
//!
//! # Cube Edge Layout
//!
//! ```text
//!       7──────6         Edge  Corners  Axis  Canonical slot
//!      /│     /│         ────  ───────  ────  ──────────────
//!     4─┼────5 │           0    [0,1]    X    (0,0,0)
//!     │ 3────┼─2           1    [1,2]    Y    (1,0,0)
//!     │/     │/            2    [2,3]    X    (0,1,0)
//!     0──────1             3    [3,0]    Y    (0,0,0)
//!                          4    [4,5]    X    (0,0,1)
//!                          5    [5,6]    Y    (1,0,1)
//!                          6    [6,7]    X    (0,1,1)
//!                          7    [7,4]    Y    (0,0,1)
//!                          8    [0,4]    Z    (0,0,0)
//!                          9    [1,5]    Z    (1,0,0)
//!                         10    [2,6]    Z    (1,1,0)
//!                         11    [3,7]    Z    (0,1,0)
//! ```
//!
//! Each physical grid edge is addressed by the grid point at its lower end
//! plus the axis it runs along. The "canonical slot" column is that address
//! relative to the cell origin; every cell sharing an edge computes the same
//! absolute address, which is what deduplicates vertices.
//!
//! # Square Edge Layout
//!
//! ```text
//!   3────2────2        Edge  Corners  Axis  Canonical slot
//!   │         │          0    [0,1]    X    (0,0)
//!   3         1          1    [1,2]    Y    (1,0)
//!   │         │          2    [2,3]    X    (0,1)
//!   0────0────1          3    [3,0]    Y    (0,0)
//! ```

use crate::constants::{CUBE_CODES, CUBE_EDGES, SQUARE_CODES, SQUARE_EDGES};

/// Canonical address of a local cell edge: offset from the cell origin to
/// the edge's lower grid point, and the axis the edge runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeShift<const D: usize> {
  pub offset: [u8; D],
  pub axis: u8,
}

impl<const D: usize> EdgeShift<D> {
  pub const fn new(offset: [u8; D], axis: u8) -> Self {
    Self { offset, axis }
  }
}

/// Cube edge endpoint corner bits (Bourke numbering).
pub const CUBE_EDGE_CORNERS: [[u8; 2]; CUBE_EDGES] = [
  [0, 1], // Edge 0:  X axis at Y=0, Z=0
  [1, 2], // Edge 1:  Y axis at X=1, Z=0
  [2, 3], // Edge 2:  X axis at Y=1, Z=0
  [3, 0], // Edge 3:  Y axis at X=0, Z=0
  [4, 5], // Edge 4:  X axis at Y=0, Z=1
  [5, 6], // Edge 5:  Y axis at X=1, Z=1
  [6, 7], // Edge 6:  X axis at Y=1, Z=1
  [7, 4], // Edge 7:  Y axis at X=0, Z=1
  [0, 4], // Edge 8:  Z axis at X=0, Y=0
  [1, 5], // Edge 9:  Z axis at X=1, Y=0
  [2, 6], // Edge 10: Z axis at X=1, Y=1
  [3, 7], // Edge 11: Z axis at X=0, Y=1
];

/// Cube local edge id to canonical `(offset, axis)` address.
pub const CUBE_EDGE_SHIFTS: [EdgeShift<3>; CUBE_EDGES] = [
  EdgeShift::new([0, 0, 0], 0),
  EdgeShift::new([1, 0, 0], 1),
  EdgeShift::new([0, 1, 0], 0),
  EdgeShift::new([0, 0, 0], 1),
  EdgeShift::new([0, 0, 1], 0),
  EdgeShift::new([1, 0, 1], 1),
  EdgeShift::new([0, 1, 1], 0),
  EdgeShift::new([0, 0, 1], 1),
  EdgeShift::new([0, 0, 0], 2),
  EdgeShift::new([1, 0, 0], 2),
  EdgeShift::new([1, 1, 0], 2),
  EdgeShift::new([0, 1, 0], 2),
];

/// Square edge endpoint corner bits.
pub const SQUARE_EDGE_CORNERS: [[u8; 2]; SQUARE_EDGES] = [
  [0, 1], // Edge 0: X axis at Y=0
  [1, 2], // Edge 1: Y axis at X=1
  [2, 3], // Edge 2: X axis at Y=1
  [3, 0], // Edge 3: Y axis at X=0
];

/// Square local edge id to canonical `(offset, axis)` address.
pub const SQUARE_EDGE_SHIFTS: [EdgeShift<2>; SQUARE_EDGES] = [
  EdgeShift::new([0, 0], 0),
  EdgeShift::new([1, 0], 1),
  EdgeShift::new([0, 1], 0),
  EdgeShift::new([0, 0], 1),
];

/// Cube edge table.
/// Index: 8-bit corner configuration code (which corners are below level)
/// Value: 12-bit edge mask (which edges are cut)
///
/// Identical to the classic 256-entry table from "Polygonising a Scalar
/// Field": an edge is cut exactly when one endpoint is inside.
pub const CUBE_EDGE_TABLE: [u16; CUBE_CODES] = generate_edge_table(&CUBE_EDGE_CORNERS);

/// Square edge table (4-bit codes to 4-bit edge masks).
pub const SQUARE_EDGE_TABLE: [u16; SQUARE_CODES] = generate_edge_table(&SQUARE_EDGE_CORNERS);

/// Generate an edge table at compile time.
const fn generate_edge_table<const CODES: usize, const EDGES: usize>(
  edges: &[[u8; 2]; EDGES],
) -> [u16; CODES] {
  let mut table = [0u16; CODES];
  let mut code = 0usize;

  while code < CODES {
    let mut edge_mask = 0u16;
    let mut edge = 0;

    while edge < EDGES {
      let c0 = edges[edge][0] as usize;
      let c1 = edges[edge][1] as usize;

      let inside0 = (code >> c0) & 1;
      let inside1 = (code >> c1) & 1;

      // Edge is cut if exactly one endpoint is inside
      if inside0 != inside1 {
        edge_mask |= 1 << edge;
      }

      edge += 1;
    }

    table[code] = edge_mask;
    code += 1;
  }

  table
}

#[cfg(test)]
#[path = "edge_table_test.rs"]
mod edge_table_test;

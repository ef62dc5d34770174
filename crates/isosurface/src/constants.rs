//! Grid conventions shared by every extraction stage.
//!
//! # Memory Layout
//!
//! ```text
//! Grids are C-ordered: the last axis is contiguous.
//!
//! Address:  0       1       ...  nz-1      nz      ...
//! Content: [0,0,0] [0,0,1]  ... [0,0,nz-1] [0,1,0] ...
//!          └──────────── Z ────────────┘
//!
//! index = (x * ny + y) * nz + z
//! ```
//!
//! # Cube Corner Numbering
//!
//! Corners follow Bourke's "Polygonising a Scalar Field" numbering, so the
//! classic edge and triangle tables can be used verbatim. For a corner at
//! offset `(i, j, k)` inside its cell the configuration bit is
//! `i - 2*i*j + 3*j + 4*k`:
//!
//! ```text
//!       7──────6         Corners (bit = offset):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(1,1,0)  3=(0,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(1,1,1)  7=(0,1,1)
//!     │ 3────┼─2
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! The 2D square numbering is the `k = 0` face of the cube: `i - 2*i*j + 3*j`.

/// Cube corner offsets indexed by configuration bit.
pub const CUBE_CORNERS: [[u8; 3]; 8] = [
  [0, 0, 0], // bit 0
  [1, 0, 0], // bit 1
  [1, 1, 0], // bit 2
  [0, 1, 0], // bit 3
  [0, 0, 1], // bit 4
  [1, 0, 1], // bit 5
  [1, 1, 1], // bit 6
  [0, 1, 1], // bit 7
];

/// Square corner offsets indexed by configuration bit.
pub const SQUARE_CORNERS: [[u8; 2]; 4] = [
  [0, 0], // bit 0
  [1, 0], // bit 1
  [1, 1], // bit 2
  [0, 1], // bit 3
];

/// Number of configuration codes for a cube cell (2^8).
pub const CUBE_CODES: usize = 256;

/// Number of configuration codes for a square cell (2^4).
pub const SQUARE_CODES: usize = 16;

/// Local edges per cube cell.
pub const CUBE_EDGES: usize = 12;

/// Local edges per square cell.
pub const SQUARE_EDGES: usize = 4;

/// Largest triangle count any cube configuration emits.
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// Largest segment count any square configuration emits.
pub const MAX_SEGMENTS_PER_CELL: usize = 2;

/// Cut-edge slot value for an edge the surface does not cross.
pub const NOT_CUT: u32 = 0;

/// Coordinate written to padded vertex rows past an item's vertex count.
pub const PAD_VERTEX: f32 = f32::INFINITY;

/// Index written to padded face rows past an item's face count.
pub const PAD_FACE: i32 = -1;

/// Configuration bit for a corner at offset `(i, j, k)` (Bourke numbering).
#[inline(always)]
pub const fn corner_bit(i: u8, j: u8, k: u8) -> u8 {
  i + 3 * j + 4 * k - 2 * i * j
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;

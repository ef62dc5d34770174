//! Linear vertex placement along cut edges.
//!
//! ```text
//!   v1 ●───────────×─────● v2        t = (level - v1) / (v2 - v1)
//!   point          │       point + e_axis
//!                  vertex = point + t * e_axis
//! ```
//!
//! Positions start at the integer grid point of each edge; the crossing
//! fraction is then added one axis family at a time. Fractions are never
//! clamped: a crossing outside `[0, 1]` can only come from non-finite input
//! and is either surfaced in the output or reported, depending on
//! [`DegenerateEdgePolicy`](crate::DegenerateEdgePolicy).

use rayon::prelude::*;

use super::cut_edges::EdgeAddress;
use crate::grid::Grid;

/// Crossing fraction along an edge with endpoint values `v1` and `v2`.
#[inline(always)]
pub(crate) fn crossing(level: f32, v1: f32, v2: f32) -> f32 {
  (level - v1) / (v2 - v1)
}

/// Vertex position for every cut edge, in id order.
pub(crate) fn interpolate<const D: usize>(
  grid: &Grid<'_, D>,
  addresses: &[EdgeAddress],
  level: f32,
) -> Vec<[f32; D]> {
  let layout = grid.layout();
  let data = grid.data();
  let strides = layout.strides();

  let mut vertices: Vec<[f32; D]> = addresses
    .par_iter()
    .map(|address| layout.unravel(address.point).map(|c| c as f32))
    .collect();

  for axis in 0..D {
    let stride = strides[axis];
    vertices
      .par_iter_mut()
      .zip(addresses.par_iter())
      .filter(|(_, address)| address.axis as usize == axis)
      .for_each(|(vertex, address)| {
        let v1 = data[address.point];
        let v2 = data[address.point + stride];
        vertex[axis] += crossing(level, v1, v2);
      });
  }

  vertices
}

/// First cut edge (by id) whose crossing fraction is not a finite value in
/// `[0, 1]`.
pub(crate) fn find_degenerate<const D: usize>(
  grid: &Grid<'_, D>,
  addresses: &[EdgeAddress],
  level: f32,
) -> Option<(EdgeAddress, f32, f32)> {
  let data = grid.data();
  let strides = grid.layout().strides();

  addresses.par_iter().find_map_first(|address| {
    let v1 = data[address.point];
    let v2 = data[address.point + strides[address.axis as usize]];
    let t = crossing(level, v1, v2);
    let valid = t.is_finite() && (0.0..=1.0).contains(&t);
    (!valid).then_some((*address, v1, v2))
  })
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;

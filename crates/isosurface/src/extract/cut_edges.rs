//! Cut-edge marking and vertex id assignment.
//!
//! Every physical grid edge has one canonical slot: the grid point at its
//! lower end plus the axis it runs along.
//!
//! ```text
//! slots: [point 0: x y z][point 1: x y z] ...   (points × D)
//!
//! pass 1 (mark):    slot += 1 for every adjacent cell whose code cuts it
//! pass 2 (assign):  nonzero slots become 1, 2, 3, ... in slot order
//! ```
//!
//! Slot order is `(x, y, z, axis)` lexicographic order, so ids depend only on
//! which edges are cut. A slot holding [`NOT_CUT`] has no vertex; any other
//! value is the vertex id plus one.
//!
//! Marking gathers rather than scatters: each point looks back at the cells
//! that own its edges (`cell = point - shift.offset`), skipping cells past
//! the grid boundary. Each slot therefore has exactly one writer and x-slabs
//! can be marked in parallel.

use rayon::prelude::*;

use super::classify::CellCodes;
use crate::constants::NOT_CUT;
use crate::layout::GridLayout;
use crate::tables::CellTopology;

/// Canonical address of one cut edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EdgeAddress {
  /// Linear index of the edge's lower grid point.
  pub point: usize,
  pub axis: u8,
}

/// Resolved cut-edge grid.
#[derive(Clone, Debug)]
pub(crate) struct CutEdges<const D: usize> {
  layout: GridLayout<D>,
  slots: Vec<u32>,
  count: usize,
}

impl<const D: usize> CutEdges<D> {
  /// Mark and number every cut edge.
  pub fn resolve<T: CellTopology<D>>(topology: &T, points: GridLayout<D>, codes: &CellCodes<D>) -> Self {
    let mut slots = mark(topology, &points, codes);
    let count = assign_ids(&mut slots, points.slab_len() * D);
    Self {
      layout: points,
      slots,
      count,
    }
  }

  /// Layout of the grid points owning the slots.
  pub fn layout(&self) -> &GridLayout<D> {
    &self.layout
  }

  /// Number of cut edges (and so output vertices).
  pub fn count(&self) -> usize {
    self.count
  }

  /// Raw slot values.
  #[cfg(test)]
  pub fn slots(&self) -> &[u32] {
    &self.slots
  }

  /// Vertex id of the edge at `point` along `axis`, if cut.
  #[cfg(test)]
  pub fn id(&self, point: [usize; D], axis: usize) -> Option<u32> {
    let slot = self.slots[self.layout.ravel(point) * D + axis];
    (slot != NOT_CUT).then(|| slot - 1)
  }

  /// Vertex id of an edge known to be cut.
  #[inline]
  pub(crate) fn id_unchecked(&self, point: usize, axis: usize) -> u32 {
    let slot = self.slots[point * D + axis];
    debug_assert_ne!(slot, NOT_CUT, "edge {} axis {} is not cut", point, axis);
    slot.wrapping_sub(1)
  }

  /// Addresses of every cut edge, in id order.
  pub fn addresses(&self) -> Vec<EdgeAddress> {
    let slab = self.layout.slab_len() * D;
    self
      .slots
      .par_chunks(slab)
      .enumerate()
      .flat_map_iter(|(x, chunk)| {
        chunk
          .iter()
          .enumerate()
          .filter(|&(_, &slot)| slot != NOT_CUT)
          .map(move |(local, _)| {
            let flat = x * slab + local;
            EdgeAddress {
              point: flat / D,
              axis: (flat % D) as u8,
            }
          })
      })
      .collect()
  }
}

/// Count the cells cutting each canonical edge slot.
fn mark<const D: usize, T: CellTopology<D>>(
  topology: &T,
  points: &GridLayout<D>,
  codes: &CellCodes<D>,
) -> Vec<u32> {
  let cells = codes.layout();
  let cell_shape = cells.shape();
  let shifts = topology.edge_shifts();
  let slab = points.slab_len();

  let mut slots = vec![NOT_CUT; points.len() * D];
  slots
    .par_chunks_mut(slab * D)
    .enumerate()
    .for_each(|(x, chunk)| {
      for local in 0..slab {
        let point = points.unravel(x * slab + local);

        for (edge, shift) in shifts.iter().enumerate() {
          // Owning cell, if it lies inside the cell grid
          let mut cell = [0usize; D];
          let mut inside = true;
          for axis in 0..D {
            let offset = shift.offset[axis] as usize;
            if point[axis] < offset || point[axis] - offset >= cell_shape[axis] {
              inside = false;
              break;
            }
            cell[axis] = point[axis] - offset;
          }
          if !inside {
            continue;
          }

          let cut = (topology.edge_mask(codes.get(cell)) >> edge) & 1;
          chunk[local * D + shift.axis as usize] += cut as u32;
        }
      }
    });

  slots
}

/// Replace nonzero slots with ascending ids (plus one). Returns the count.
///
/// Per-slab counts run in parallel, an exclusive prefix sum gives each slab
/// its first id, then slabs are numbered in parallel.
fn assign_ids(slots: &mut [u32], slab: usize) -> usize {
  let counts: Vec<usize> = slots
    .par_chunks(slab)
    .map(|chunk| chunk.iter().filter(|&&slot| slot != NOT_CUT).count())
    .collect();

  let mut firsts = Vec::with_capacity(counts.len());
  let mut total = 0usize;
  for count in &counts {
    firsts.push(total);
    total += count;
  }

  slots
    .par_chunks_mut(slab)
    .zip(firsts.par_iter())
    .for_each(|(chunk, &first)| {
      let mut next = first as u32;
      for slot in chunk.iter_mut().filter(|slot| **slot != NOT_CUT) {
        next += 1;
        *slot = next;
      }
    });

  total
}

#[cfg(test)]
#[path = "cut_edges_test.rs"]
mod cut_edges_test;

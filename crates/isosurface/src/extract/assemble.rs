//! Primitive assembly by bucket.
//!
//! Cells are grouped by how many primitives their code emits. Within one
//! bucket every cell gathers the same number of edge addresses, so each
//! bucket is a fixed-width gather:
//!
//! ```text
//! for c in 1..=buckets:
//!   cells_c   = [cell | count[code[cell]] == c]          (enumeration order)
//!   addresses = cell + buckets[c].row(code[cell])        (c * arity each)
//!   ids      += cut_edges[addresses]
//! ```
//!
//! Output is the concatenation of buckets in ascending count, so primitive
//! order depends only on the codes.

use rayon::prelude::*;

use super::classify::CellCodes;
use super::cut_edges::CutEdges;
use crate::tables::CellTopology;

/// Flat vertex ids, `T::ARITY` per primitive.
pub(crate) fn assemble<const D: usize, T: CellTopology<D>>(
  topology: &T,
  codes: &CellCodes<D>,
  cut_edges: &CutEdges<D>,
) -> Vec<u32> {
  let cells = codes.layout();
  let points = cut_edges.layout();
  let mut indices = Vec::new();

  for bucket in topology.buckets() {
    let primitives = bucket.primitives();

    let selected: Vec<usize> = codes
      .codes()
      .par_iter()
      .enumerate()
      .filter(|&(_, &code)| topology.primitive_count(code) as usize == primitives)
      .map(|(cell, _)| cell)
      .collect();

    if selected.is_empty() {
      continue;
    }

    let ids: Vec<u32> = selected
      .par_iter()
      .flat_map_iter(move |&cell| {
        let origin = cells.unravel(cell);
        let code = codes.codes()[cell];
        bucket.row(code).iter().map(move |shift| {
          let mut point = origin;
          for axis in 0..D {
            point[axis] += shift.offset[axis] as usize;
          }
          cut_edges.id_unchecked(points.ravel(point), shift.axis as usize)
        })
      })
      .collect();

    debug_assert_eq!(ids.len(), selected.len() * bucket.width());
    indices.extend_from_slice(&ids);
  }

  indices
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod assemble_test;

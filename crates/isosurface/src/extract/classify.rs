//! Cell classification.
//!
//! The "below level" mask is computed once for every sample, then shifted by
//! each corner offset and accumulated into the cell grid:
//!
//! ```text
//! code[c] = Σ  below[c + corner(b)] << b      for b in 0..corners
//! ```
//!
//! Each corner is one whole-array pass over the cells; there is no per-cell
//! branching. Cells span `shape - 1` along every axis, so no corner ever
//! reads past the last sample.

use rayon::prelude::*;

use crate::grid::Grid;
use crate::layout::GridLayout;
use crate::tables::CellTopology;

/// Configuration code of every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CellCodes<const D: usize> {
  layout: GridLayout<D>,
  codes: Vec<u8>,
}

impl<const D: usize> CellCodes<D> {
  /// Layout of the cell grid.
  pub fn layout(&self) -> &GridLayout<D> {
    &self.layout
  }

  pub fn codes(&self) -> &[u8] {
    &self.codes
  }

  /// Code of the cell at `cell`.
  #[inline]
  pub fn get(&self, cell: [usize; D]) -> u8 {
    self.codes[self.layout.ravel(cell)]
  }
}

/// Classify every cell of `grid` against `level`.
pub(crate) fn classify<const D: usize, T: CellTopology<D>>(
  topology: &T,
  grid: &Grid<'_, D>,
  level: f32,
) -> CellCodes<D> {
  let points = *grid.layout();
  let cells = points.cells();

  // Inside means strictly below the level; NaN samples are never inside
  let below: Vec<u8> = grid
    .data()
    .par_iter()
    .map(|&value| (value < level) as u8)
    .collect();

  let mut codes = vec![0u8; cells.len()];
  let slab = cells.slab_len();

  for (bit, corner) in topology.corners().iter().enumerate() {
    let offset = points.ravel(corner.map(usize::from));
    codes
      .par_chunks_mut(slab)
      .enumerate()
      .for_each(|(x, chunk)| {
        let first = x * slab;
        for (local, code) in chunk.iter_mut().enumerate() {
          let origin = points.ravel(cells.unravel(first + local));
          *code |= below[origin + offset] << bit;
        }
      });
  }

  CellCodes {
    layout: cells,
    codes,
  }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

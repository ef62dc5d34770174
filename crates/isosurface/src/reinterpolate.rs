//! Re-interpolation of vertices against their source field.
//!
//! Given vertices produced by extraction (or by any other backend), recompute
//! each position from the two grid samples bracketing it:
//!
//! ```text
//! v0 = floor(vertex)      f0 = field[v0]
//! v1 = ceil(vertex)       f1 = field[v1]
//!
//! alpha  = clamp((f0 - level) / (f0 - f1), 0, 1)
//! vertex = (1 - alpha) * v0 + alpha * v1
//! ```
//!
//! A vertex on a cut edge has at most one fractional coordinate, so `v0` and
//! `v1` are the edge endpoints. When `f0 == f1` the fraction is taken as 0 and
//! the result is `v0`, the floor of the vertex. A vertex exactly on a grid
//! point has `v0 == v1` and so comes back unchanged. Unlike the extraction
//! core, this utility clamps the fraction.

use rayon::prelude::*;

use crate::error::{ExtractError, Result};
use crate::grid::Grid;

/// Recompute `vertices` from `grid` at `level`.
///
/// Fails with [`ExtractError::VertexOutsideGrid`] for the first vertex (by
/// index) with a non-finite coordinate or a bracketing sample outside the
/// grid.
pub fn reinterpolate_vertices<const D: usize>(
  vertices: &[[f32; D]],
  grid: &Grid<'_, D>,
  level: f32,
) -> Result<Vec<[f32; D]>> {
  let shape = grid.shape();
  let inside = |vertex: &[f32; D]| {
    vertex
      .iter()
      .zip(shape.iter())
      .all(|(&c, &n)| c.is_finite() && c >= 0.0 && c.ceil() <= (n - 1) as f32)
  };

  if let Some(index) = vertices.par_iter().position_first(|vertex| !inside(vertex)) {
    return Err(ExtractError::VertexOutsideGrid { index });
  }

  let layout = grid.layout();
  let data = grid.data();

  Ok(
    vertices
      .par_iter()
      .map(|vertex| {
        let v0 = vertex.map(f32::floor);
        let v1 = vertex.map(f32::ceil);
        let f0 = data[layout.ravel(v0.map(|c| c as usize))];
        let f1 = data[layout.ravel(v1.map(|c| c as usize))];

        let denom = f0 - f1;
        let alpha = if denom == 0.0 {
          0.0
        } else {
          ((f0 - level) / denom).clamp(0.0, 1.0)
        };

        let mut out = [0.0f32; D];
        for axis in 0..D {
          out[axis] = (1.0 - alpha) * v0[axis] + alpha * v1[axis];
        }
        out
      })
      .collect(),
  )
}

#[cfg(test)]
#[path = "reinterpolate_test.rs"]
mod reinterpolate_test;

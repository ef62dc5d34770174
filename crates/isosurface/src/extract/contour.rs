//! Chaining 2D segments into contour runs.
//!
//! Every cut edge is shared by at most two cells, so each vertex has degree
//! one (grid boundary) or two. Runs are walked in a fixed order:
//!
//! 1. open runs, starting at degree-one vertices in ascending id order
//! 2. closed loops, starting at the smallest vertex not yet visited
//!
//! Closed loops repeat their first point at the end. Closure is flagged per
//! run, since distinct vertices can share a position.

use smallvec::SmallVec;

use crate::types::Contours;

/// Chain `segments` (flat vertex id pairs) over `vertices` into runs.
pub(crate) fn chain(vertices: &[[f32; 2]], segments: &[u32]) -> Contours {
  let mut neighbors: Vec<SmallVec<[u32; 2]>> = vec![SmallVec::new(); vertices.len()];
  for pair in segments.chunks_exact(2) {
    neighbors[pair[0] as usize].push(pair[1]);
    neighbors[pair[1] as usize].push(pair[0]);
  }

  let mut visited = vec![false; vertices.len()];
  let mut contours = Contours::new();

  for start in 0..vertices.len() {
    if visited[start] || neighbors[start].len() != 1 {
      continue;
    }
    let len = walk(start, &neighbors, &mut visited, vertices, &mut contours.vertices);
    contours.push_run(len, false);
  }

  for start in 0..vertices.len() {
    if visited[start] || neighbors[start].is_empty() {
      continue;
    }
    let len = walk(start, &neighbors, &mut visited, vertices, &mut contours.vertices);
    contours.vertices.push(vertices[start]);
    contours.push_run(len + 1, true);
  }

  contours
}

/// Follow unvisited neighbors from `start`, appending points. Returns the
/// number of points appended.
fn walk(
  start: usize,
  neighbors: &[SmallVec<[u32; 2]>],
  visited: &mut [bool],
  vertices: &[[f32; 2]],
  out: &mut Vec<[f32; 2]>,
) -> usize {
  let mut current = start;
  let mut len = 0;
  loop {
    visited[current] = true;
    out.push(vertices[current]);
    len += 1;

    match neighbors[current]
      .iter()
      .map(|&n| n as usize)
      .find(|&n| !visited[n])
    {
      Some(next) => current = next,
      None => return len,
    }
  }
}

#[cfg(test)]
#[path = "contour_test.rs"]
mod contour_test;

//! Core data types for isosurface extraction.

use glam::Vec3;

/// What to do when a cut edge yields a crossing fraction outside `[0, 1]`.
///
/// This can only happen with non-finite input (NaN or infinite samples),
/// because the classification guarantees the two endpoints straddle the
/// level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DegenerateEdgePolicy {
  /// Write the raw NaN/inf coordinate into the output.
  #[default]
  Propagate,

  /// Fail the call with [`ExtractError::DegenerateEdge`](crate::ExtractError).
  Reject,
}

/// Configuration for single-grid extraction.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
  /// Return the empty result immediately when the level lies strictly
  /// outside the sample range. Output is identical either way.
  pub level_fast_path: bool,

  /// Handling of non-finite crossing fractions.
  pub degenerate_edges: DegenerateEdgePolicy,
}

impl Default for ExtractConfig {
  fn default() -> Self {
    Self {
      level_fast_path: true,
      degenerate_edges: DegenerateEdgePolicy::default(),
    }
  }
}

impl ExtractConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_level_fast_path(mut self, enabled: bool) -> Self {
    self.level_fast_path = enabled;
    self
  }

  pub fn with_degenerate_edges(mut self, policy: DegenerateEdgePolicy) -> Self {
    self.degenerate_edges = policy;
    self
  }
}

/// Configuration for padded batch extraction.
#[derive(Clone, Debug)]
pub struct BatchConfig {
  /// Vertex rows reserved per item.
  pub max_vertices: u32,

  /// Face rows reserved per item.
  pub max_faces: u32,

  /// Extract items on the rayon pool (each item keeps private scratch).
  pub parallel: bool,

  /// Per-item extraction settings.
  pub extract: ExtractConfig,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self {
      max_vertices: 0,
      max_faces: 0,
      parallel: true,
      extract: ExtractConfig::default(),
    }
  }
}

impl BatchConfig {
  pub fn new(max_vertices: u32, max_faces: u32) -> Self {
    Self {
      max_vertices,
      max_faces,
      ..Self::default()
    }
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn with_extract_config(mut self, extract: ExtractConfig) -> Self {
    self.extract = extract;
    self
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Triangle mesh extracted from a volume.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
  /// Grid-fractional vertex positions, one per cut edge.
  pub vertices: Vec<[f32; 3]>,

  /// Vertex index triples, one per triangle.
  pub faces: Vec<[u32; 3]>,
}

impl Mesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty() && self.faces.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn face_count(&self) -> usize {
    self.faces.len()
  }

  /// Bounding box of all vertices.
  pub fn bounds(&self) -> MinMaxAABB {
    let mut bounds = MinMaxAABB::empty();
    for &vertex in &self.vertices {
      bounds.encapsulate(vertex);
    }
    bounds
  }

  /// Per-face normals `(v - u) x (w - u)`, optionally normalized.
  ///
  /// Unnormalized normals have length equal to twice the triangle area.
  pub fn face_normals(&self, normalize: bool) -> Vec<[f32; 3]> {
    self
      .faces
      .iter()
      .map(|&[a, b, c]| {
        let u = Vec3::from_array(self.vertices[a as usize]);
        let v = Vec3::from_array(self.vertices[b as usize]);
        let w = Vec3::from_array(self.vertices[c as usize]);
        let normal = (v - u).cross(w - u);
        if normalize {
          (normal / normal.length()).to_array()
        } else {
          normal.to_array()
        }
      })
      .collect()
  }
}

/// Contour runs extracted from a 2D field.
///
/// Runs are stored back to back in `vertices`; `lengths[i]` is the number of
/// points in run `i` and `closed[i]` whether it is a loop. A closed run
/// repeats its first point at the end.
///
/// Closure is recorded while chaining, never read back from coordinates:
/// samples exactly at the level place distinct vertices on the same point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contours {
  pub vertices: Vec<[f32; 2]>,
  pub lengths: Vec<u32>,
  pub closed: Vec<bool>,
}

impl Contours {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.lengths.is_empty()
  }

  /// Number of runs.
  pub fn len(&self) -> usize {
    self.lengths.len()
  }

  /// Iterate runs as point slices.
  pub fn iter(&self) -> impl Iterator<Item = &[[f32; 2]]> + '_ {
    let mut start = 0usize;
    self.lengths.iter().map(move |&len| {
      let run = &self.vertices[start..start + len as usize];
      start += len as usize;
      run
    })
  }

  /// Whether run `index` is a closed loop. `false` past the end.
  pub fn is_closed(&self, index: usize) -> bool {
    self.closed.get(index).copied().unwrap_or(false)
  }

  /// Append a run of `len` points already pushed onto `vertices`.
  pub(crate) fn push_run(&mut self, len: usize, closed: bool) {
    self.lengths.push(len as u32);
    self.closed.push(closed);
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

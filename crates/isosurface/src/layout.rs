//! Row-major index arithmetic for runtime-shaped grids.
//!
//! ```text
//! shape   = [nx, ny, nz]
//! strides = [ny * nz, nz, 1]
//!
//! ravel([x, y, z])  = x * strides[0] + y * strides[1] + z
//! unravel(index)    = [index / strides[0], (index / strides[1]) % ny, index % nz]
//! ```
//!
//! The outermost axis is used as the unit of parallel work: a "slab" is every
//! element sharing one `x` coordinate, and slabs are contiguous in memory.

/// Shape and strides of a dense C-ordered grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout<const D: usize> {
  shape: [usize; D],
  strides: [usize; D],
}

impl<const D: usize> GridLayout<D> {
  /// Build a layout for `shape` with C-order strides.
  pub fn new(shape: [usize; D]) -> Self {
    let mut strides = [1usize; D];
    for axis in (0..D.saturating_sub(1)).rev() {
      strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    Self { shape, strides }
  }

  pub fn shape(&self) -> [usize; D] {
    self.shape
  }

  pub fn strides(&self) -> [usize; D] {
    self.strides
  }

  /// Total number of elements.
  pub fn len(&self) -> usize {
    self.shape.iter().product()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Elements per outermost-axis slab.
  pub fn slab_len(&self) -> usize {
    if D == 0 {
      1
    } else {
      self.strides[0]
    }
  }

  /// Layout of the cells between the points of this layout (one fewer per
  /// axis).
  pub fn cells(&self) -> Self {
    Self::new(self.shape.map(|n| n.saturating_sub(1)))
  }

  /// Convert coordinates to a linear index.
  #[inline(always)]
  pub fn ravel(&self, coord: [usize; D]) -> usize {
    let mut index = 0;
    for axis in 0..D {
      index += coord[axis] * self.strides[axis];
    }
    index
  }

  /// Convert a linear index back to coordinates.
  #[inline(always)]
  pub fn unravel(&self, index: usize) -> [usize; D] {
    let mut coord = [0usize; D];
    let mut rest = index;
    for axis in 0..D {
      coord[axis] = rest / self.strides[axis];
      rest %= self.strides[axis];
    }
    coord
  }

  /// Whether `coord` lies inside the grid.
  #[inline]
  pub fn contains(&self, coord: [usize; D]) -> bool {
    coord.iter().zip(self.shape.iter()).all(|(&c, &n)| c < n)
  }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

//! Borrowed scalar grids and volume batches.
//!
//! Grids never copy or mutate the caller's samples. Construction validates
//! the shape once, so every later stage can index without bounds surprises.

use crate::error::{ExtractError, Result};
use crate::layout::GridLayout;

/// Dense C-ordered scalar samples with `D` axes.
#[derive(Clone, Copy, Debug)]
pub struct Grid<'a, const D: usize> {
  data: &'a [f32],
  layout: GridLayout<D>,
}

/// 3D sample volume `(nx, ny, nz)`.
pub type Volume<'a> = Grid<'a, 3>;

/// 2D sample field `(nx, ny)`.
pub type Field<'a> = Grid<'a, 2>;

impl<'a, const D: usize> Grid<'a, D> {
  /// Wrap `data` as a grid of `shape`.
  ///
  /// Fails with [`ExtractError::InputShape`] when any axis has fewer than two
  /// samples, when `data.len()` does not equal the shape's element count, or
  /// when the grid has more edges than `u32` vertex ids can number.
  pub fn new(data: &'a [f32], shape: [usize; D]) -> Result<Self> {
    let len = validate_shape(&shape)?;
    if len != data.len() {
      return Err(shape_error(&shape, "sample count does not match shape"));
    }
    Ok(Self::from_parts(data, GridLayout::new(shape)))
  }

  /// Build from an already validated layout.
  pub(crate) fn from_parts(data: &'a [f32], layout: GridLayout<D>) -> Self {
    debug_assert_eq!(data.len(), layout.len());
    Self { data, layout }
  }

  pub fn data(&self) -> &'a [f32] {
    self.data
  }

  pub fn shape(&self) -> [usize; D] {
    self.layout.shape()
  }

  pub fn layout(&self) -> &GridLayout<D> {
    &self.layout
  }

  /// Sample at `coord`, or `None` outside the grid.
  #[inline]
  pub fn get(&self, coord: [usize; D]) -> Option<f32> {
    if self.layout.contains(coord) {
      Some(self.data[self.layout.ravel(coord)])
    } else {
      None
    }
  }

  /// Minimum and maximum sample, or `None` if any sample is NaN.
  pub fn value_range(&self) -> Option<(f32, f32)> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &value in self.data {
      if value.is_nan() {
        return None;
      }
      min = min.min(value);
      max = max.max(value);
    }
    Some((min, max))
  }
}

/// A collection of equally shaped volumes stored back to back.
#[derive(Clone, Copy, Debug)]
pub struct VolumeBatch<'a> {
  data: &'a [f32],
  len: usize,
  layout: GridLayout<3>,
}

impl<'a> VolumeBatch<'a> {
  /// Wrap `data` as `len` volumes of `shape`.
  pub fn new(data: &'a [f32], len: usize, shape: [usize; 3]) -> Result<Self> {
    let item_len = validate_shape(&shape)?;
    let total = item_len
      .checked_mul(len)
      .ok_or_else(|| shape_error(&shape, "batch size overflows usize"))?;
    if total != data.len() {
      return Err(shape_error(
        &[len, shape[0], shape[1], shape[2]],
        "sample count does not match batch shape",
      ));
    }
    Ok(Self {
      data,
      len,
      layout: GridLayout::new(shape),
    })
  }

  /// Number of volumes.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Shape shared by every volume.
  pub fn shape(&self) -> [usize; 3] {
    self.layout.shape()
  }

  /// Volume at `index`, or `None` past the end.
  pub fn item(&self, index: usize) -> Option<Volume<'a>> {
    if index >= self.len {
      return None;
    }
    let item_len = self.layout.len();
    let start = index * item_len;
    Some(Grid::from_parts(
      &self.data[start..start + item_len],
      self.layout,
    ))
  }

  /// Iterate volumes in batch order.
  pub fn iter(&self) -> impl Iterator<Item = Volume<'a>> + '_ {
    (0..self.len).filter_map(move |index| self.item(index))
  }
}

/// Check a grid shape and return its element count.
fn validate_shape<const D: usize>(shape: &[usize; D]) -> Result<usize> {
  if D == 0 {
    return Err(shape_error(shape, "grid needs at least one axis"));
  }
  if shape.iter().any(|&n| n < 2) {
    return Err(shape_error(
      shape,
      "every axis needs at least 2 samples",
    ));
  }
  let len = shape
    .iter()
    .try_fold(1usize, |acc, &n| acc.checked_mul(n))
    .ok_or_else(|| shape_error(shape, "element count overflows usize"))?;

  // One edge slot per axis per point; ids plus the "not cut" slot must fit u32.
  let edge_slots = len.checked_mul(D).unwrap_or(usize::MAX);
  if edge_slots >= u32::MAX as usize {
    return Err(shape_error(shape, "too many edges for u32 vertex ids"));
  }
  Ok(len)
}

fn shape_error(shape: &[usize], reason: &'static str) -> ExtractError {
  ExtractError::InputShape {
    shape: shape.to_vec(),
    reason,
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

//! Error types for extraction calls.
//!
//! Every failure is local to one call: scratch state is allocated per call,
//! so there is nothing to roll back and a retried call behaves like a fresh
//! one.

use thiserror::Error;

/// Errors that can occur during isosurface extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
  /// The sample buffer does not describe a usable rectilinear grid.
  #[error("invalid grid shape {shape:?}: {reason}")]
  InputShape {
    shape: Vec<usize>,
    reason: &'static str,
  },

  /// A cut edge produced a crossing fraction outside `[0, 1]` (or NaN).
  ///
  /// Only reported under [`DegenerateEdgePolicy::Reject`](crate::DegenerateEdgePolicy).
  #[error("degenerate cut edge at {point:?} along axis {axis}: endpoint values {v1} and {v2}")]
  DegenerateEdge {
    point: Vec<usize>,
    axis: usize,
    v1: f32,
    v2: f32,
  },

  /// A batch item needs more room than the fixed padding provides.
  #[error(
    "batch item {item} does not fit its padding: {vertices} vertices (max {max_vertices}), \
     {faces} faces (max {max_faces})"
  )]
  PaddingOverflow {
    item: usize,
    vertices: usize,
    max_vertices: u32,
    faces: usize,
    max_faces: u32,
  },

  /// Padding capacities that cannot be represented in the output buffers.
  #[error("invalid batch configuration: {reason}")]
  InvalidBatchConfig { reason: &'static str },

  /// A vertex passed for re-interpolation lies outside the sampled grid.
  #[error("vertex {index} lies outside the sampled grid")]
  VertexOutsideGrid { index: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;

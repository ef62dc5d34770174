//! Extraction statistics.
//!
//! Feature-gated and runtime-toggled: without the `metrics` feature every
//! `record_*` call is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use isosurface::metrics::{ExtractionMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let mut metrics = ExtractionMetrics::new();
//! let mesh = metrics.time_extraction(|| extract_isosurface_3d(&volume, 0.0))?;
//! metrics.record_batch(&padded);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use web_time::Instant;

use crate::batch::PaddedBatch;
use crate::error::Result;
use crate::types::Mesh;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Whether metrics are collected (compiled in and toggled on).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Fixed-capacity window of the most recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, evicting the oldest at capacity.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl RollingWindow<u64> {
    pub fn sum(&self) -> u64 {
        self.buffer.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Running totals over extraction calls.
#[derive(Debug, Clone, Default)]
pub struct ExtractionMetrics {
    /// Recent per-extraction times in microseconds.
    pub timings: RollingWindow<u64>,
    /// Extractions recorded.
    pub extractions: u64,
    /// Extractions that produced no geometry.
    pub empty_extractions: u64,
    /// Vertices over all recorded extractions.
    pub total_vertices: u64,
    /// Faces over all recorded extractions.
    pub total_faces: u64,
    /// Largest vertex count seen in one extraction.
    pub peak_vertices: u64,
    /// Largest face count seen in one extraction.
    pub peak_faces: u64,
}

impl ExtractionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one extraction result.
    pub fn record_extraction(&mut self, vertices: usize, faces: usize, timing_us: u64) {
        if !is_enabled() {
            return;
        }

        self.timings.push(timing_us);
        self.extractions += 1;
        if vertices == 0 && faces == 0 {
            self.empty_extractions += 1;
        }
        self.total_vertices += vertices as u64;
        self.total_faces += faces as u64;
        self.peak_vertices = self.peak_vertices.max(vertices as u64);
        self.peak_faces = self.peak_faces.max(faces as u64);
    }

    /// Record every item of a padded batch, using its per-item timings.
    pub fn record_batch(&mut self, batch: &PaddedBatch) {
        for ((&nv, &nf), &timing_us) in batch.nv.iter().zip(&batch.nf).zip(&batch.timing_us) {
            self.record_extraction(nv as usize, nf as usize, timing_us);
        }
    }

    /// Run `extract`, recording its mesh size and wall time on success.
    pub fn time_extraction<F>(&mut self, extract: F) -> Result<Mesh>
    where
        F: FnOnce() -> Result<Mesh>,
    {
        let start = Instant::now();
        let mesh = extract()?;
        let timing_us = start.elapsed().as_micros() as u64;
        self.record_extraction(mesh.vertex_count(), mesh.face_count(), timing_us);
        Ok(mesh)
    }

    /// Average extraction time in microseconds over the window.
    pub fn avg_timing_us(&self) -> f64 {
        self.timings.average()
    }

    /// Suggested padding capacities covering every extraction seen so far.
    pub fn suggested_capacity(&self) -> (u32, u32) {
        let clamp = |n: u64| n.min(i32::MAX as u64) as u32;
        (clamp(self.peak_vertices), clamp(self.peak_faces))
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

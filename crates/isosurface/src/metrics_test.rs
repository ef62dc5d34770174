use super::*;

#[test]
fn test_rolling_window() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());
    assert_eq!(window.min_max(), None);

    window.push(10u64);
    window.push(20);
    window.push(30);
    assert_eq!(window.sum(), 60);
    assert_eq!(window.average(), 20.0);

    // Oldest is evicted
    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 90);
    assert_eq!(window.min_max(), Some((20, 40)));
}

#[test]
fn test_zero_capacity_window() {
    let mut window = RollingWindow::new(0);
    window.push(1u64);
    assert!(window.is_empty());
}

#[cfg(feature = "metrics")]
mod enabled {
    use super::*;
    use crate::batch::PaddedBatch;

    #[test]
    fn test_record_extraction() {
        let mut metrics = ExtractionMetrics::new();
        metrics.record_extraction(30, 56, 100);
        metrics.record_extraction(0, 0, 10);
        metrics.record_extraction(12, 20, 40);

        assert_eq!(metrics.extractions, 3);
        assert_eq!(metrics.empty_extractions, 1);
        assert_eq!(metrics.total_vertices, 42);
        assert_eq!(metrics.total_faces, 76);
        assert_eq!(metrics.suggested_capacity(), (30, 56));
        assert_eq!(metrics.avg_timing_us(), 50.0);

        metrics.reset();
        assert_eq!(metrics.extractions, 0);
        assert!(metrics.timings.is_empty());
    }

    #[test]
    fn test_record_batch() {
        let batch = PaddedBatch {
            max_vertices: 4,
            max_faces: 2,
            vertices: vec![[0.0; 3]; 8],
            faces: vec![[0; 3]; 4],
            nv: vec![0, 3],
            nf: vec![0, 1],
            timing_us: vec![5, 7],
        };
        let mut metrics = ExtractionMetrics::new();
        metrics.record_batch(&batch);

        assert_eq!(metrics.extractions, 2);
        assert_eq!(metrics.empty_extractions, 1);
        assert_eq!(metrics.total_vertices, 3);
        assert_eq!(metrics.timings.len(), 2);
        assert_eq!(metrics.timings.min_max(), Some((5, 7)));
    }

    #[test]
    fn test_time_extraction() {
        let mut metrics = ExtractionMetrics::new();
        let mesh = metrics.time_extraction(|| Ok(Mesh::new())).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(metrics.extractions, 1);
    }
}

#[cfg(not(feature = "metrics"))]
#[test]
fn test_recording_disabled_without_feature() {
    let mut metrics = ExtractionMetrics::new();
    assert!(!is_enabled());
    metrics.record_extraction(3, 1, 10);
    assert_eq!(metrics.extractions, 0);
    assert!(metrics.timings.is_empty());
}

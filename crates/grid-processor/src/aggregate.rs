//! Parallel aggregation of point contributions onto a baseline field.
//!
//! Points are split into chunks. Each chunk is interpolated on a fixed-size
//! rayon pool, its contribution grids are collected, and the calling thread
//! sums them into the field before the next chunk starts. The chunk size is
//! therefore the upper bound on full-size grids held in memory at once.
//!
//! ```text
//! points ──► chunk 0 ──► pool (N workers) ──► Vec<ContributionGrid> ──► Field += …
//!        ──► chunk 1 ──► pool (N workers) ──► Vec<ContributionGrid> ──► Field += …
//!        ──► …
//! ```

use crate::config::DEFAULT_BASELINE;
use crate::error::{GridError, Result};
use crate::interpolation::RadialInterpolator;
use crate::types::{ContributionGrid, Field, GridAxes};
use aqi_common::PointReading;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Settings for [`Aggregator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorConfig {
    /// Background value every cell starts from.
    pub baseline: f64,
    /// Worker thread count; defaults to the number of logical CPUs.
    pub workers: Option<usize>,
    /// Points per chunk; defaults to `max(1, points / workers)`.
    pub chunk_size: Option<usize>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE,
            workers: None,
            chunk_size: None,
        }
    }
}

/// Summary of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    pub points: usize,
    pub chunks: usize,
    pub chunk_size: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Owns the worker pool and folds contributions into a [`Field`].
pub struct Aggregator {
    interpolator: RadialInterpolator,
    baseline: f64,
    chunk_size: Option<usize>,
    workers: usize,
    pool: rayon::ThreadPool,
}

impl Aggregator {
    /// Create an aggregator and start its worker pool.
    pub fn new(interpolator: RadialInterpolator, config: AggregatorConfig) -> Result<Self> {
        if !config.baseline.is_finite() {
            return Err(GridError::invalid_parameter(
                "baseline",
                format!("baseline must be finite, got {}", config.baseline),
            ));
        }
        if config.workers == Some(0) {
            return Err(GridError::invalid_parameter("workers", "must be at least 1"));
        }
        if config.chunk_size == Some(0) {
            return Err(GridError::invalid_parameter("chunk_size", "must be at least 1"));
        }

        let workers = config.workers.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("heatmap-worker-{}", i))
            .build()
            .map_err(|e| GridError::WorkerPool(e.to_string()))?;

        Ok(Self {
            interpolator,
            baseline: config.baseline,
            chunk_size: config.chunk_size,
            workers,
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Chunk size used for `point_count` points.
    pub fn chunk_size_for(&self, point_count: usize) -> usize {
        self.chunk_size
            .unwrap_or_else(|| (point_count / self.workers).max(1))
    }

    /// Interpolate every point and sum the results onto a baseline field.
    ///
    /// Fails on the first point that cannot be interpolated; no partial
    /// field is returned.
    pub fn aggregate(&self, axes: &GridAxes, points: &[PointReading]) -> Result<(Field, AggregateStats)> {
        let start = Instant::now();
        let (rows, cols) = axes.shape();
        let mut field = Field::filled(rows, cols, self.baseline);

        let chunk_size = self.chunk_size_for(points.len());
        let mut chunks = 0;

        for (chunk_idx, chunk) in points.chunks(chunk_size).enumerate() {
            let offset = chunk_idx * chunk_size;
            let contributions = self.interpolate_chunk(axes, chunk, offset)?;

            for contribution in &contributions {
                field.accumulate(contribution)?;
            }

            chunks += 1;
            debug!(chunk = chunk_idx, points = chunk.len(), "Chunk folded into field");
        }

        let stats = AggregateStats {
            points: points.len(),
            chunks,
            chunk_size,
            workers: self.workers,
            elapsed: start.elapsed(),
        };

        info!(
            points = stats.points,
            chunks = stats.chunks,
            workers = stats.workers,
            rows,
            cols,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Aggregated point contributions"
        );

        Ok((field, stats))
    }

    /// Run one chunk on the pool and wait for all of its grids.
    fn interpolate_chunk(
        &self,
        axes: &GridAxes,
        chunk: &[PointReading],
        offset: usize,
    ) -> Result<Vec<ContributionGrid>> {
        let interpolator = &self.interpolator;
        self.pool.install(|| {
            chunk
                .par_iter()
                .enumerate()
                .map(|(i, point)| {
                    interpolator
                        .contribution(axes, point)
                        .map_err(|e| e.for_point(offset + i))
                })
                .collect()
        })
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("interpolator", &self.interpolator)
            .field("baseline", &self.baseline)
            .field("chunk_size", &self.chunk_size)
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_axes;
    use aqi_common::BoundingBox;

    #[test]
    fn test_default_chunk_size() {
        let interp = RadialInterpolator::new(100.0).unwrap();
        let agg = Aggregator::new(
            interp,
            AggregatorConfig {
                workers: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(agg.chunk_size_for(0), 1);
        assert_eq!(agg.chunk_size_for(3), 1);
        assert_eq!(agg.chunk_size_for(10), 2);
        assert_eq!(agg.chunk_size_for(400), 100);
    }

    #[test]
    fn test_rejects_zero_workers() {
        let interp = RadialInterpolator::new(100.0).unwrap();
        let config = AggregatorConfig {
            workers: Some(0),
            ..Default::default()
        };
        assert!(Aggregator::new(interp, config).is_err());
    }

    #[test]
    fn test_no_points_leaves_baseline() {
        let axes = build_axes(&BoundingBox::new(0.0, 0.05, 0.0, 0.05), 1000.0).unwrap();
        let interp = RadialInterpolator::new(2000.0).unwrap();
        let agg = Aggregator::new(interp, AggregatorConfig::default()).unwrap();

        let (field, stats) = agg.aggregate(&axes, &[]).unwrap();
        assert_eq!(stats.chunks, 0);
        assert!(field.data().iter().all(|&v| v == DEFAULT_BASELINE));
    }

    #[test]
    fn test_failure_reports_point_index() {
        let axes = build_axes(&BoundingBox::new(0.0, 0.05, 0.0, 0.05), 1000.0).unwrap();
        let interp = RadialInterpolator::new(2000.0).unwrap();
        let agg = Aggregator::new(
            interp,
            AggregatorConfig {
                workers: Some(2),
                chunk_size: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

        let points = vec![
            PointReading::new(0.01, 0.01, 10.0),
            PointReading::new(0.02, 0.02, 10.0),
            PointReading::new(0.03, 0.03, 10.0),
            PointReading::new(0.04, f64::INFINITY, 10.0),
        ];
        let err = agg.aggregate(&axes, &points).unwrap_err();
        assert!(matches!(err, GridError::PointFailed { index: 3, .. }));
    }
}

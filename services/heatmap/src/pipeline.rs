//! End-to-end heatmap generation.
//!
//! load points → build axes → aggregate → colorize → write PNG → overlay

use crate::config::RunConfig;
use crate::error::{PipelineError, Result};
use crate::overlay::{OverlayHandoff, OverlaySink};
use aqi_common::{load_points_from_file, PointReading};
use grid_processor::{
    build_axes_with_limit, AggregateStats, Aggregator, Field, GridAxes, RadialInterpolator,
};
use renderer::{colorize, write_png_file, ColorRamp, Raster};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// In-memory result of rendering a set of readings.
#[derive(Debug, Clone)]
pub struct HeatmapOutput {
    pub axes: GridAxes,
    pub field: Field,
    pub raster: Raster,
    pub stats: AggregateStats,
}

impl HeatmapOutput {
    /// `(min, max)` of the aggregated field.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.field.min_max()
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub points: usize,
    pub rows: usize,
    pub cols: usize,
    pub field_min: f64,
    pub field_max: f64,
    pub output: PathBuf,
    pub png_bytes: usize,
    pub aggregate: AggregateStats,
    pub elapsed: Duration,
}

/// Build the field and raster for `points` without touching the filesystem,
/// unless the configuration names a custom color ramp file.
pub fn render(points: &[PointReading], config: &RunConfig) -> Result<HeatmapOutput> {
    config.validate()?;
    let ramp = ColorRamp::from_config(&config.load_color_ramp()?)?;
    render_with_ramp(points, config, &ramp)
}

/// [`render`] with an already built ramp.
pub fn render_with_ramp(
    points: &[PointReading],
    config: &RunConfig,
    ramp: &ColorRamp,
) -> Result<HeatmapOutput> {
    let grid = &config.grid;
    let axes = build_axes_with_limit(&config.bbox, grid.accuracy_m, grid.max_cells)?;

    let outside = points
        .iter()
        .filter(|p| !config.bbox.contains_point(p.latitude, p.longitude))
        .count();
    if outside > 0 {
        debug!(outside, "Points outside the bounding box still contribute near its edges");
    }
    if points.is_empty() {
        warn!("No point readings, field will be flat at baseline");
    }

    let interpolator = RadialInterpolator::new(grid.decay_radius_m)?;
    let aggregator = Aggregator::new(interpolator, grid.aggregator_config())?;
    let (field, stats) = aggregator.aggregate(&axes, points)?;

    let raster = colorize(field.data(), field.cols(), field.rows(), ramp)?;

    Ok(HeatmapOutput {
        axes,
        field,
        raster,
        stats,
    })
}

/// Run the full pipeline: read the input file, render, write the PNG and
/// publish the overlay.
pub fn run(config: &RunConfig, sink: &mut dyn OverlaySink) -> Result<RunReport> {
    let start = Instant::now();
    config.validate()?;

    info!(
        input = %config.input.display(),
        bbox = %config.bbox,
        accuracy_m = config.grid.accuracy_m,
        decay_radius_m = config.grid.decay_radius_m,
        "Starting heatmap run"
    );

    let points = load_points_from_file(&config.input)?;
    let output = render(&points, config)?;

    let png_bytes = write_png_file(&output.raster, &config.output)?;
    info!(
        path = %config.output.display(),
        width = output.raster.width(),
        height = output.raster.height(),
        bytes = png_bytes,
        "Heatmap image saved"
    );

    let handoff = OverlayHandoff::new(
        output.raster.clone(),
        config.bbox,
        config.overlay.opacity,
        config.overlay.zoom_start,
    );
    sink.publish(&handoff)?;

    let (field_min, field_max) = output.value_range().ok_or_else(|| {
        PipelineError::Render(renderer::RenderError::EmptyField)
    })?;

    let report = RunReport {
        points: points.len(),
        rows: output.field.rows(),
        cols: output.field.cols(),
        field_min,
        field_max,
        output: config.output.clone(),
        png_bytes,
        aggregate: output.stats,
        elapsed: start.elapsed(),
    };

    info!(
        points = report.points,
        rows = report.rows,
        cols = report.cols,
        min = report.field_min,
        max = report.field_max,
        elapsed_s = format!("{:.2}", report.elapsed.as_secs_f64()),
        "Heatmap run complete"
    );

    Ok(report)
}

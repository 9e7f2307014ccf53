//! AQI heatmap generation.
//!
//! Reads point readings, interpolates them over a regular grid, colors the
//! field and hands the raster to a map overlay sink.

pub mod config;
pub mod error;
pub mod overlay;
pub mod pipeline;

pub use config::{OverlayConfig, RunConfig};
pub use error::{PipelineError, Result};
pub use overlay::{
    overlay_image_path, FileOverlaySink, MemoryOverlaySink, OverlayDocument, OverlayHandoff,
    OverlaySink,
};
pub use pipeline::{render, render_with_ramp, run, HeatmapOutput, RunReport};

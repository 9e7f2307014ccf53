//! Run configuration.
//!
//! Every parameter of a run lives in [`RunConfig`]. It can be loaded from a
//! YAML file and then overridden field by field from the command line:
//!
//! ```yaml
//! input: car_data.json
//! bbox:
//!   lat_min: 38.205683
//!   lat_max: 38.294508
//!   lon_min: 21.688356
//!   lon_max: 21.830913
//! accuracy_m: 5.0
//! decay_radius_m: 15.0
//! baseline: 10.0
//! workers: 8
//! output: heatmap_image.png
//! overlay:
//!   path: heatmap_overlay.json
//!   opacity: 0.6
//! color_ramp: ramps/aqi.json
//! ```

use crate::error::{PipelineError, Result};
use crate::overlay::overlay_image_path;
use aqi_common::BoundingBox;
use grid_processor::GridProcessorConfig;
use renderer::ColorRampConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_INPUT: &str = "car_data.json";
pub const DEFAULT_OUTPUT: &str = "heatmap_image.png";
pub const DEFAULT_OVERLAY: &str = "heatmap_overlay.json";
pub const DEFAULT_OPACITY: f64 = 0.6;
pub const DEFAULT_ZOOM: u8 = 12;

/// Patras city center.
pub const DEFAULT_BBOX: BoundingBox = BoundingBox {
    lat_min: 38.205683,
    lat_max: 38.294508,
    lon_min: 21.688356,
    lon_max: 21.830913,
};

/// Parameters of one heatmap run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// JSON array of point readings.
    pub input: PathBuf,

    /// Region to rasterize.
    pub bbox: BoundingBox,

    /// Grid resolution, decay radius, baseline and worker settings.
    #[serde(flatten)]
    pub grid: GridProcessorConfig,

    /// Where the raster PNG is written (row 0 = southernmost latitude).
    pub output: PathBuf,

    pub overlay: OverlayConfig,

    /// Custom color ramp (JSON); the AQI ramp is used when unset.
    pub color_ramp: Option<PathBuf>,
}

/// Settings for the map overlay hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlay document path; the north-up image is written beside it.
    pub path: PathBuf,
    pub opacity: f64,
    pub zoom_start: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OVERLAY),
            opacity: DEFAULT_OPACITY,
            zoom_start: DEFAULT_ZOOM,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            bbox: DEFAULT_BBOX,
            grid: GridProcessorConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            overlay: OverlayConfig::default(),
            color_ramp: None,
        }
    }
}

impl RunConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a YAML run file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config = Self::from_yaml_str(&content).map_err(|source| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded run configuration");
        Ok(config)
    }

    /// Check every parameter before any grid is allocated.
    pub fn validate(&self) -> Result<()> {
        self.bbox.validate().map_err(grid_processor::GridError::from)?;
        self.grid.validate().map_err(PipelineError::Config)?;

        if !(0.0..=1.0).contains(&self.overlay.opacity) {
            return Err(PipelineError::Config(format!(
                "overlay opacity must be within [0, 1], got {}",
                self.overlay.opacity
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(PipelineError::Config("output path is empty".to_string()));
        }

        let overlay_image = overlay_image_path(&self.overlay.path);
        if overlay_image == self.overlay.path {
            return Err(PipelineError::Config(format!(
                "overlay path {} must not end in .png, the overlay image is written there",
                self.overlay.path.display()
            )));
        }
        if self.output == overlay_image || self.output == self.overlay.path {
            return Err(PipelineError::Config(format!(
                "output {} collides with the overlay files",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// The configured color ramp, or the default AQI ramp.
    pub fn load_color_ramp(&self) -> Result<ColorRampConfig> {
        match &self.color_ramp {
            Some(path) => Ok(ColorRampConfig::from_file(path)?),
            None => Ok(ColorRampConfig::default()),
        }
    }
}

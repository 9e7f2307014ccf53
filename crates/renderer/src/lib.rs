//! Color mapping and raster encoding for heatmaps.
//!
//! - `style`: color ramp configuration (named, hex or RGB stops)
//! - `gradient`: min-max normalization, LUT color ramp, RGB raster
//! - `png`: indexed/RGB PNG encoding

pub mod error;
pub mod gradient;
pub mod png;
pub mod style;

pub use error::{RenderError, Result};
pub use gradient::{colorize, normalize, ColorRamp, Raster, Rgb};
pub use png::{create_png, create_png_auto, create_png_indexed, encode_raster, write_png_file};
pub use style::{Color, ColorRampConfig, AQI_BREAKPOINTS, DEFAULT_LUT_SIZE};

//! Color ramp configuration.
//!
//! A ramp is an ordered list of colors spread evenly over the normalized
//! range `[0, 1]`. It can be loaded from JSON:
//!
//! ```json
//! {
//!   "color_stops": ["green", "yellow", "#FFA500", [255, 0, 0], "purple", "maroon"],
//!   "breakpoints": [0, 50, 100, 150, 200, 300, 500],
//!   "lut_size": 256
//! }
//! ```

use crate::error::{RenderError, Result};
use crate::gradient::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of entries in the precomputed lookup table.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// AQI category bounds. Carried for legends; the color mapping itself is a
/// min-max normalization over evenly spaced stops and does not use them.
pub const AQI_BREAKPOINTS: [f64; 7] = [0.0, 50.0, 100.0, 150.0, 200.0, 300.0, 500.0];

/// Settings for building a [`crate::gradient::ColorRamp`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRampConfig {
    /// Colors from lowest to highest value, evenly spaced.
    pub color_stops: Vec<Color>,

    /// Documented scalar bounds for the stops.
    #[serde(default)]
    pub breakpoints: Vec<f64>,

    /// Lookup table resolution.
    #[serde(default = "default_lut_size")]
    pub lut_size: usize,
}

fn default_lut_size() -> usize {
    DEFAULT_LUT_SIZE
}

impl Default for ColorRampConfig {
    /// Green, yellow, orange, red, purple, maroon.
    fn default() -> Self {
        Self {
            color_stops: ["green", "yellow", "orange", "red", "purple", "maroon"]
                .iter()
                .map(|name| Color::Named(name.to_string()))
                .collect(),
            breakpoints: AQI_BREAKPOINTS.to_vec(),
            lut_size: DEFAULT_LUT_SIZE,
        }
    }
}

impl ColorRampConfig {
    /// Parse a ramp from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a ramp from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Check stop count, LUT size, and breakpoint ordering.
    pub fn validate(&self) -> Result<()> {
        if self.color_stops.len() < 2 {
            return Err(RenderError::InvalidRamp(
                "a ramp needs at least 2 color stops".to_string(),
            ));
        }

        if self.lut_size < 2 {
            return Err(RenderError::InvalidRamp(format!(
                "lut_size must be at least 2, got {}",
                self.lut_size
            )));
        }

        for w in self.breakpoints.windows(2) {
            if w[1] <= w[0] {
                return Err(RenderError::InvalidRamp(
                    "breakpoints must be in ascending order".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Resolve every stop to RGB.
    pub fn resolve_stops(&self) -> Result<Vec<Rgb>> {
        self.color_stops.iter().map(Color::to_rgb).collect()
    }
}

/// Color representation supporting multiple formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// RGB array: [r, g, b]
    Array([u8; 3]),

    /// Hex string "#RRGGBB" or a named color
    Named(String),
}

impl Color {
    /// Convert to RGB.
    pub fn to_rgb(&self) -> Result<Rgb> {
        match self {
            Color::Array([r, g, b]) => Ok(Rgb::new(*r, *g, *b)),
            Color::Named(s) if s.starts_with('#') => {
                hex_to_rgb(s).ok_or_else(|| RenderError::UnknownColor(s.clone()))
            }
            Color::Named(s) => named_color(s).ok_or_else(|| RenderError::UnknownColor(s.clone())),
        }
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    // byte slicing below needs one byte per character
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Rgb::new(r, g, b))
}

/// CSS color names, matching the values plotting libraries use.
pub fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name.to_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "red" => (255, 0, 0),
        "purple" => (128, 0, 128),
        "maroon" => (128, 0, 0),
        "blue" => (0, 0, 255),
        "navy" => (0, 0, 128),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        _ => return None,
    };
    Some(Rgb::new(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("#00FF00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(hex_to_rgb("0000FF"), Some(Rgb::new(0, 0, 255)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }

    #[test]
    fn test_default_ramp() {
        let config = ColorRampConfig::default();
        config.validate().unwrap();
        let stops = config.resolve_stops().unwrap();
        assert_eq!(stops.len(), 6);
        assert_eq!(stops[0], Rgb::new(0, 128, 0));
        assert_eq!(stops[5], Rgb::new(128, 0, 0));
        assert_eq!(config.breakpoints, AQI_BREAKPOINTS.to_vec());
    }
}

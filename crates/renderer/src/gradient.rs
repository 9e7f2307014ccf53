//! Gradient rendering of scalar fields.
//!
//! Values are min-max normalized to `[0, 1]` and looked up in a
//! precomputed color table built from evenly spaced stops.

use crate::error::{RenderError, Result};
use crate::style::ColorRampConfig;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Minimum cells before colorization is split across threads.
const PARALLEL_THRESHOLD: usize = 16_384;

/// Color value in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Linear color interpolation at `num / den` of the way from `color1` to
/// `color2`. Channels are truncated toward zero, as 8-bit colormap tables do.
fn interpolate_color(color1: Rgb, color2: Rgb, num: usize, den: usize) -> Rgb {
    let num = num.min(den) as i64;
    let den = den.max(1) as i64;
    let lerp = |a: u8, b: u8| {
        let (a, b) = (a as i64, b as i64);
        ((a * den + (b - a) * num) / den) as u8
    };

    Rgb::new(
        lerp(color1.r, color2.r),
        lerp(color1.g, color2.g),
        lerp(color1.b, color2.b),
    )
}

/// A color ramp sampled into a fixed-size lookup table.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
    lut: Vec<Rgb>,
    breakpoints: Vec<f64>,
}

impl ColorRamp {
    /// Resolve colors and build the lookup table.
    pub fn from_config(config: &ColorRampConfig) -> Result<Self> {
        config.validate()?;
        let stops = config.resolve_stops()?;
        let n = config.lut_size;
        let segments = stops.len() - 1;

        // entry k sits at k * segments / (n - 1) along the stops, kept as an
        // exact fraction so stop colors land on their entries unchanged
        let lut = (0..n)
            .map(|k| {
                let pos = k * segments;
                let seg = (pos / (n - 1)).min(segments - 1);
                interpolate_color(stops[seg], stops[seg + 1], pos - seg * (n - 1), n - 1)
            })
            .collect();

        debug!(stops = stops.len(), lut_size = n, "Built color ramp");

        Ok(Self {
            stops,
            lut,
            breakpoints: config.breakpoints.clone(),
        })
    }

    /// The six-color AQI ramp of [`ColorRampConfig::default`].
    pub fn aqi() -> Result<Self> {
        Self::from_config(&ColorRampConfig::default())
    }

    /// Color for a normalized value. Out-of-range and NaN inputs clamp to the ends.
    pub fn color_at(&self, t: f64) -> Rgb {
        let n = self.lut.len();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = ((t * n as f64).floor() as usize).min(n - 1);
        self.lut[idx]
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    pub fn lut(&self) -> &[Rgb] {
        &self.lut
    }

    /// Legend bounds carried from the configuration.
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn lowest(&self) -> Rgb {
        self.lut[0]
    }

    pub fn highest(&self) -> Rgb {
        self.lut[self.lut.len() - 1]
    }
}

/// Min-max normalize values to `[0, 1]`.
///
/// A flat input (every value equal, or empty) maps to all zeros so the whole
/// field takes the lowest color.
pub fn normalize(data: &[f64]) -> Vec<f64> {
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let range = max - min;
    if data.is_empty() || range <= 0.0 || !range.is_finite() {
        if !data.is_empty() {
            warn!(value = min, cells = data.len(), "Flat field, rendering lowest color");
        }
        return vec![0.0; data.len()];
    }

    data.iter().map(|&v| (v - min) / range).collect()
}

/// RGB raster, row-major, row 0 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap RGB bytes (3 per pixel).
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height * 3 {
            return Err(RenderError::ShapeMismatch {
                width,
                height,
                actual: pixels.len() / 3,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = (row * self.width + col) * 3;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Copy with row order reversed.
    ///
    /// Row 0 of a heatmap is the southernmost latitude; image viewers and
    /// map overlays expect the northern edge first.
    pub fn flipped_vertically(&self) -> Raster {
        let stride = self.width * 3;
        let pixels = if stride == 0 {
            Vec::new()
        } else {
            self.pixels
                .chunks_exact(stride)
                .rev()
                .flatten()
                .copied()
                .collect()
        };
        Raster {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Render a row-major field of `width * height` values through a ramp.
///
/// # Arguments
/// - `data`: Field values (row-major order)
/// - `width`: Number of columns
/// - `height`: Number of rows
/// - `ramp`: Color ramp for the normalized values
pub fn colorize(data: &[f64], width: usize, height: usize, ramp: &ColorRamp) -> Result<Raster> {
    if data.is_empty() {
        return Err(RenderError::EmptyField);
    }
    if data.len() != width * height {
        return Err(RenderError::ShapeMismatch {
            width,
            height,
            actual: data.len(),
        });
    }

    let normalized = normalize(data);
    let mut pixels = vec![0u8; data.len() * 3];

    let paint = |(px, &t): (&mut [u8], &f64)| {
        let c = ramp.color_at(t);
        px[0] = c.r;
        px[1] = c.g;
        px[2] = c.b;
    };

    if data.len() >= PARALLEL_THRESHOLD {
        pixels
            .par_chunks_exact_mut(3)
            .zip(normalized.par_iter())
            .for_each(paint);
    } else {
        pixels
            .chunks_exact_mut(3)
            .zip(normalized.iter())
            .for_each(paint);
    }

    Raster::from_pixels(width, height, pixels)
}

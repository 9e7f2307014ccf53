//! Geographic bounding box for the interpolation region.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rectangular lat/lon region in degrees.
///
/// The box is axis-aligned in geographic coordinates. Grids built over it
/// cover the half-open ranges `[lat_min, lat_max)` and `[lon_min, lon_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box. No validation is performed; call
    /// [`BoundingBox::validate`] before building a grid over it.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Check that all bounds are finite and that `min < max` on both axes.
    pub fn validate(&self) -> Result<(), BboxError> {
        let bounds = [self.lat_min, self.lat_max, self.lon_min, self.lon_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(BboxError::NonFinite(*self));
        }
        if self.lat_min >= self.lat_max {
            return Err(BboxError::Degenerate {
                axis: "latitude",
                min: self.lat_min,
                max: self.lat_max,
            });
        }
        if self.lon_min >= self.lon_max {
            return Err(BboxError::Degenerate {
                axis: "longitude",
                min: self.lon_min,
                max: self.lon_max,
            });
        }
        if self.lat_min < -90.0 || self.lat_max > 90.0 {
            return Err(BboxError::LatitudeOutOfRange(*self));
        }
        Ok(())
    }

    /// Latitude of the box midpoint, used as the reference latitude for
    /// meter/degree conversion.
    pub fn mid_lat(&self) -> f64 {
        (self.lat_min + self.lat_max) / 2.0
    }

    /// Center of the box as `(lat, lon)`.
    pub fn center(&self) -> (f64, f64) {
        (self.mid_lat(), (self.lon_min + self.lon_max) / 2.0)
    }

    /// Extent in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Extent in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Check if a point is inside the box (edges inclusive).
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }

    /// Corner pair in the `[[south, west], [north, east]]` order web maps
    /// expect for image overlays.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.lat_min, self.lon_min], [self.lat_max, self.lon_max]]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        )
    }
}

impl FromStr for BoundingBox {
    type Err = BboxError;

    /// Parse `"lat_min,lat_max,lon_min,lon_max"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            lat_min: parse(parts[0])?,
            lat_max: parse(parts[1])?,
            lon_min: parse(parts[2])?,
            lon_max: parse(parts[3])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxError {
    #[error("Invalid bounding box format: {0}. Expected 'lat_min,lat_max,lon_min,lon_max'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),

    #[error("Bounding box has non-finite bounds: {0}")]
    NonFinite(BoundingBox),

    #[error("Degenerate {axis} range: min {min} must be below max {max}")]
    Degenerate {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Latitude bounds of {0} fall outside [-90, 90]")]
    LatitudeOutOfRange(BoundingBox),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox: BoundingBox = "38.205683,38.294508,21.688356,21.830913".parse().unwrap();
        assert_eq!(bbox.lat_min, 38.205683);
        assert_eq!(bbox.lat_max, 38.294508);
        assert_eq!(bbox.lon_min, 21.688356);
        assert_eq!(bbox.lon_max, 21.830913);
    }

    #[test]
    fn test_center() {
        let bbox = BoundingBox::new(0.0, 1.0, 10.0, 12.0);
        assert_eq!(bbox.center(), (0.5, 11.0));
    }
}

//! Common test fixtures for AQI heatmap tests.
//!
//! This module provides pre-defined regions and input files that represent
//! common scenarios.

use aqi_common::{BoundingBox, PointReading};
use std::io::Write;
use tempfile::NamedTempFile;

/// Common bounding box definitions for testing.
pub mod bbox {
    use aqi_common::BoundingBox;

    /// One degree square at the origin.
    pub const UNIT_SQUARE: BoundingBox = BoundingBox {
        lat_min: 0.0,
        lat_max: 1.0,
        lon_min: 0.0,
        lon_max: 1.0,
    };

    /// City-scale box over Patras, Greece.
    pub const PATRAS: BoundingBox = BoundingBox {
        lat_min: 38.205683,
        lat_max: 38.294508,
        lon_min: 21.688356,
        lon_max: 21.830913,
    };

    /// A few kilometers across, handy for fast tests.
    pub const SMALL: BoundingBox = BoundingBox {
        lat_min: 10.0,
        lat_max: 10.05,
        lon_min: 20.0,
        lon_max: 20.05,
    };

    /// Invalid box (min > max on both axes).
    pub const INVALID: BoundingBox = BoundingBox {
        lat_min: 1.0,
        lat_max: 0.0,
        lon_min: 1.0,
        lon_max: 0.0,
    };
}

/// Serialize readings to the `[{"lat", "lon", "aqi"}]` input format.
pub fn points_to_json(points: &[PointReading]) -> String {
    let values: Vec<serde_json::Value> = points
        .iter()
        .map(|p| serde_json::json!({ "lat": p.latitude, "lon": p.longitude, "aqi": p.value }))
        .collect();
    serde_json::Value::Array(values).to_string()
}

/// Write readings to a temporary JSON file that lives as long as the handle.
pub fn write_points_file(points: &[PointReading]) -> NamedTempFile {
    write_json_file(&points_to_json(points))
}

/// Write raw JSON text to a temporary file.
pub fn write_json_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(json.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Geometric center of a box as a reading with the given value.
pub fn center_point(bbox: &BoundingBox, value: f64) -> PointReading {
    let (lat, lon) = bbox.center();
    PointReading::new(lat, lon, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_to_json_round_trip() {
        let points = vec![PointReading::new(1.5, 2.5, 30.0)];
        let parsed = aqi_common::load_points_from_str(&points_to_json(&points)).unwrap();
        assert_eq!(parsed, points);
    }

    #[test]
    fn test_fixture_boxes() {
        assert!(bbox::UNIT_SQUARE.validate().is_ok());
        assert!(bbox::PATRAS.validate().is_ok());
        assert!(bbox::INVALID.validate().is_err());
    }
}

//! Geotagged pollutant readings and their JSON input format.

use crate::error::{InputError, InputResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One sensor observation: a location and its AQI value.
///
/// Deserialized from `{"lat": .., "lon": .., "aqi": ..}` where `aqi` may be
/// either a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct PointReading {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "aqi")]
    pub value: f64,
}

impl PointReading {
    pub fn new(latitude: f64, longitude: f64, value: f64) -> Self {
        Self {
            latitude,
            longitude,
            value,
        }
    }

    /// Name of the first non-finite field, if any.
    pub fn non_finite_field(&self) -> Option<(&'static str, f64)> {
        [
            ("lat", self.latitude),
            ("lon", self.longitude),
            ("aqi", self.value),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

/// Wire shape of a reading before the AQI value is coerced.
#[derive(Debug, Deserialize)]
struct RawPoint {
    lat: f64,
    lon: f64,
    aqi: AqiValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AqiValue {
    Number(f64),
    Text(String),
}

impl TryFrom<RawPoint> for PointReading {
    type Error = String;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        let value = match raw.aqi {
            AqiValue::Number(v) => v,
            AqiValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("aqi value '{}' is not numeric", s))?,
        };
        Ok(PointReading::new(raw.lat, raw.lon, value))
    }
}

/// Parse a JSON array of readings.
pub fn load_points_from_str(json: &str) -> InputResult<Vec<PointReading>> {
    let points: Vec<PointReading> = serde_json::from_str(json)?;

    for (index, point) in points.iter().enumerate() {
        if let Some((field, value)) = point.non_finite_field() {
            return Err(InputError::NonFinite {
                index,
                field,
                value,
            });
        }
    }

    Ok(points)
}

/// Read and parse a JSON array of readings from disk.
pub fn load_points_from_file(path: impl AsRef<Path>) -> InputResult<Vec<PointReading>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
    let points = load_points_from_str(&content)?;
    debug!(path = %path.display(), count = points.len(), "Loaded point readings");
    Ok(points)
}

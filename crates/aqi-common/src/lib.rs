//! Common types and utilities shared across the AQI heatmap crates.

pub mod bbox;
pub mod error;
pub mod point;

pub use bbox::{BboxError, BoundingBox};
pub use error::{InputError, InputResult};
pub use point::{load_points_from_file, load_points_from_str, PointReading};

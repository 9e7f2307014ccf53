//! Coordinate conversions for small geographic regions.
//!
//! Implements the equirectangular small-area approximation from scratch
//! without external dependencies.

pub mod equirectangular;

pub use equirectangular::{
    degrees_to_meters, meters_to_degrees, planar_distance_m, EARTH_RADIUS_M, METERS_PER_DEGREE,
};

//! Equirectangular (plate carrée) small-area approximation.
//!
//! The Earth is treated as a sphere of radius [`EARTH_RADIUS_M`]. Distances
//! along a meridian map linearly to degrees of latitude; distances along a
//! parallel are stretched by `1 / cos(lat)` to account for meridian
//! convergence. This is only accurate for regions a few tens of kilometers
//! across and is not a geodesic model.

use std::f64::consts::PI;

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Length of one degree of arc on the sphere, in meters.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Convert a distance in meters to degrees of latitude and longitude at the
/// given reference latitude.
///
/// Returns `(lat_deg, lon_deg)`. At `ref_lat_deg = ±90` the cosine term is
/// zero and the longitude result is infinite.
pub fn meters_to_degrees(meters: f64, ref_lat_deg: f64) -> (f64, f64) {
    let lat_deg = meters / EARTH_RADIUS_M * (180.0 / PI);
    let lon_deg = meters / (EARTH_RADIUS_M * ref_lat_deg.to_radians().cos()) * (180.0 / PI);
    (lat_deg, lon_deg)
}

/// Inverse of [`meters_to_degrees`]: the physical length in meters of an
/// angular step along a meridian and along the parallel at `ref_lat_deg`.
pub fn degrees_to_meters(lat_deg: f64, lon_deg: f64, ref_lat_deg: f64) -> (f64, f64) {
    let lat_m = lat_deg * PI / 180.0 * EARTH_RADIUS_M;
    let lon_m = lon_deg * PI / 180.0 * EARTH_RADIUS_M * ref_lat_deg.to_radians().cos();
    (lat_m, lon_m)
}

/// Approximate distance in meters between two points.
///
/// Euclidean distance in degree space scaled by the arc length of one
/// degree. There is no cosine correction on the longitude difference, so
/// east-west separations are overestimated away from the equator.
#[inline]
pub fn planar_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat1 - lat2;
    let dlon = lon1 - lon2;
    (dlat * dlat + dlon * dlon).sqrt() * METERS_PER_DEGREE
}

//! Generators for synthetic point readings.
//!
//! All random generators take a seed so failures are reproducible.

use aqi_common::{BoundingBox, PointReading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates `count` readings uniformly distributed inside `bbox`, with AQI
/// values in `[0, max_aqi)`.
///
/// # Example
///
/// ```
/// use test_utils::{random_points, bbox};
///
/// let points = random_points(42, 10, &bbox::UNIT_SQUARE, 300.0);
/// assert_eq!(points.len(), 10);
/// assert!(points.iter().all(|p| bbox::UNIT_SQUARE.contains_point(p.latitude, p.longitude)));
/// ```
pub fn random_points(seed: u64, count: usize, bbox: &BoundingBox, max_aqi: f64) -> Vec<PointReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            PointReading::new(
                rng.gen_range(bbox.lat_min..bbox.lat_max),
                rng.gen_range(bbox.lon_min..bbox.lon_max),
                rng.gen_range(0.0..max_aqi),
            )
        })
        .collect()
}

/// Creates readings on a regular `n x n` lattice inside `bbox`, each with
/// value `value`.
pub fn lattice_points(n: usize, bbox: &BoundingBox, value: f64) -> Vec<PointReading> {
    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let lat = bbox.lat_min + bbox.lat_span() * (i as f64 + 0.5) / n as f64;
            let lon = bbox.lon_min + bbox.lon_span() * (j as f64 + 0.5) / n as f64;
            points.push(PointReading::new(lat, lon, value));
        }
    }
    points
}

/// Returns a copy of `points` in a seeded random order.
pub fn shuffled(seed: u64, points: &[PointReading]) -> Vec<PointReading> {
    use rand::seq::SliceRandom;
    let mut out = points.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

//! Radial linear-decay interpolation of a single point reading.

use crate::error::{GridError, Result};
use crate::types::{ContributionGrid, GridAxes};
use aqi_common::PointReading;
use projection::{planar_distance_m, METERS_PER_DEGREE};

/// Relative slack on the search window so cells exactly on the radius are
/// never excluded by rounding in the degree conversion.
const WINDOW_SLACK: f64 = 1e-9;

/// Spreads a reading over the cells within `decay_radius_m` of it.
///
/// A cell at distance `d` receives `value * (1 - d / radius)`; cells beyond
/// the radius receive nothing. Distances use the planar approximation of
/// [`planar_distance_m`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialInterpolator {
    decay_radius_m: f64,
}

impl RadialInterpolator {
    /// Create an interpolator. The radius must be finite and positive.
    pub fn new(decay_radius_m: f64) -> Result<Self> {
        if !decay_radius_m.is_finite() || decay_radius_m <= 0.0 {
            return Err(GridError::invalid_parameter(
                "decay_radius_m",
                format!("decay radius must be a positive number of meters, got {}", decay_radius_m),
            ));
        }
        Ok(Self { decay_radius_m })
    }

    pub fn decay_radius_m(&self) -> f64 {
        self.decay_radius_m
    }

    /// Linear decay factor for a distance: 1 at the point, 0 at and beyond
    /// the radius.
    #[inline]
    pub fn weight(&self, distance_m: f64) -> f64 {
        if distance_m > self.decay_radius_m {
            return 0.0;
        }
        (1.0 - distance_m / self.decay_radius_m).max(0.0)
    }

    /// Compute `point`'s contribution to every cell of the grid.
    ///
    /// Only rows and columns whose axis offset alone is within the radius
    /// are visited; every other cell is necessarily beyond it and stays 0.
    pub fn contribution(&self, axes: &GridAxes, point: &PointReading) -> Result<ContributionGrid> {
        if let Some((field, value)) = point.non_finite_field() {
            return Err(GridError::NonFinitePoint { field, value });
        }
        if point.value < 0.0 {
            return Err(GridError::NegativeValue(point.value));
        }

        let (rows, cols) = axes.shape();
        let mut grid = ContributionGrid::zeros(rows, cols);

        let reach_deg = self.decay_radius_m / METERS_PER_DEGREE * (1.0 + WINDOW_SLACK);
        let row_range = axes.row_range(point.latitude - reach_deg, point.latitude + reach_deg);
        let col_range = axes.col_range(point.longitude - reach_deg, point.longitude + reach_deg);

        for row in row_range.clone() {
            let lat = axes.lat_values[row];
            for col in col_range.clone() {
                let lon = axes.lon_values[col];
                let distance = planar_distance_m(lat, lon, point.latitude, point.longitude);
                let w = self.weight(distance);
                if w > 0.0 {
                    grid.set(row, col, point.value * w);
                }
            }
        }

        grid.set_window(row_range, col_range);
        Ok(grid)
    }
}

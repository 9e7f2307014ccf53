//! Regular lat/lon grid construction at a physical resolution.

use crate::error::{GridError, Result};
use crate::types::GridAxes;
use aqi_common::BoundingBox;
use projection::meters_to_degrees;
use tracing::debug;

/// Upper bound on the number of cells in a single grid (~400 MB of `f64`).
pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

/// Build grid axes over `bbox` with cells `resolution_m` meters apart.
///
/// Uses [`DEFAULT_MAX_CELLS`] as the size limit.
pub fn build_axes(bbox: &BoundingBox, resolution_m: f64) -> Result<GridAxes> {
    build_axes_with_limit(bbox, resolution_m, DEFAULT_MAX_CELLS)
}

/// Build grid axes over `bbox` with cells `resolution_m` meters apart,
/// rejecting grids larger than `max_cells`.
///
/// The angular step is evaluated once at the box mid-latitude. Each axis is
/// the half-open range `[min, max)` stepped by that amount, so the last
/// value lies strictly inside the box. A box narrower than one step yields
/// a single-value axis at its minimum.
pub fn build_axes_with_limit(
    bbox: &BoundingBox,
    resolution_m: f64,
    max_cells: usize,
) -> Result<GridAxes> {
    if !resolution_m.is_finite() || resolution_m <= 0.0 {
        return Err(GridError::invalid_parameter(
            "accuracy_m",
            format!("resolution must be a positive number of meters, got {}", resolution_m),
        ));
    }
    bbox.validate()?;

    let (lat_step, lon_step) = meters_to_degrees(resolution_m, bbox.mid_lat());
    if !(lat_step > 0.0 && lat_step.is_finite() && lon_step > 0.0 && lon_step.is_finite()) {
        return Err(GridError::invalid_parameter(
            "accuracy_m",
            format!(
                "resolution {} m gives unusable steps ({}, {}) degrees",
                resolution_m, lat_step, lon_step
            ),
        ));
    }

    let rows = axis_len(bbox.lat_min, bbox.lat_max, lat_step);
    let cols = axis_len(bbox.lon_min, bbox.lon_max, lon_step);

    if rows.saturating_mul(cols) > max_cells {
        return Err(GridError::GridTooLarge {
            rows,
            cols,
            max_cells,
        });
    }

    let lat_values = axis_values(bbox.lat_min, lat_step, rows);
    let lon_values = axis_values(bbox.lon_min, lon_step, cols);

    if !strictly_increasing(&lat_values) || !strictly_increasing(&lon_values) {
        return Err(GridError::invalid_parameter(
            "accuracy_m",
            format!("resolution {} m is below floating point precision for this region", resolution_m),
        ));
    }

    if rows == 1 || cols == 1 {
        debug!(rows, cols, bbox = %bbox, "Bounding box is narrower than one grid cell");
    }

    debug!(rows, cols, lat_step, lon_step, "Built grid axes");

    Ok(GridAxes {
        lat_values,
        lon_values,
        lat_step,
        lon_step,
        bbox: *bbox,
    })
}

/// Number of values in `[min, max)` stepped by `step`.
fn axis_len(min: f64, max: f64, step: f64) -> usize {
    let n = ((max - min) / step).ceil();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

fn axis_values(min: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|k| min + k as f64 * step).collect()
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_len_matches_half_open_range() {
        assert_eq!(axis_len(0.0, 1.0, 0.25), 4);
        assert_eq!(axis_len(0.0, 1.0, 0.3), 4);
        assert_eq!(axis_len(0.0, 1.0, 2.0), 1);
    }

    #[test]
    fn test_rejects_non_positive_resolution() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        assert!(matches!(
            build_axes(&bbox, 0.0),
            Err(GridError::InvalidParameter { param: "accuracy_m", .. })
        ));
        assert!(build_axes(&bbox, -5.0).is_err());
        assert!(build_axes(&bbox, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_degenerate_bbox() {
        let bbox = BoundingBox::new(1.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            build_axes(&bbox, 100.0),
            Err(GridError::InvalidBbox(_))
        ));
    }

    #[test]
    fn test_cell_limit() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        let err = build_axes_with_limit(&bbox, 100.0, 1000).unwrap_err();
        assert!(matches!(err, GridError::GridTooLarge { max_cells: 1000, .. }));
    }
}

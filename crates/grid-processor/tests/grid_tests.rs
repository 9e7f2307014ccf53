//! Tests for grid axis construction.

use aqi_common::BoundingBox;
use grid_processor::{build_axes, GridError};
use projection::{degrees_to_meters, meters_to_degrees};
use test_utils::{assert_close, bbox};

fn assert_strictly_increasing(values: &[f64]) {
    for w in values.windows(2) {
        assert!(w[0] < w[1], "{} !< {}", w[0], w[1]);
    }
}

// ============================================================================
// Spacing tests
// ============================================================================

#[test]
fn test_steps_reconvert_to_requested_accuracy() {
    let cases = [
        (bbox::UNIT_SQUARE, 1000.0),
        (bbox::PATRAS, 25.0),
        (bbox::PATRAS, 250.0),
        (bbox::SMALL, 37.5),
        (BoundingBox::new(59.0, 61.0, 10.0, 14.0), 2000.0),
        (BoundingBox::new(-45.0, -44.5, 170.0, 171.0), 800.0),
    ];

    for (bbox, accuracy) in cases {
        let axes = build_axes(&bbox, accuracy).unwrap();
        assert_strictly_increasing(&axes.lat_values);
        assert_strictly_increasing(&axes.lon_values);

        let mid = bbox.mid_lat();
        for w in axes.lat_values.windows(2) {
            let (lat_m, _) = degrees_to_meters(w[1] - w[0], 0.0, mid);
            assert_close!(lat_m, accuracy, accuracy * 1e-6);
        }
        for w in axes.lon_values.windows(2) {
            let (_, lon_m) = degrees_to_meters(0.0, w[1] - w[0], mid);
            assert_close!(lon_m, accuracy, accuracy * 1e-6);
        }
    }
}

#[test]
fn test_steps_use_mid_latitude() {
    let bbox = BoundingBox::new(40.0, 50.0, 0.0, 1.0);
    let axes = build_axes(&bbox, 1000.0).unwrap();
    let (lat_step, lon_step) = meters_to_degrees(1000.0, 45.0);
    assert_eq!(axes.lat_step, lat_step);
    assert_eq!(axes.lon_step, lon_step);
}

// ============================================================================
// Extent tests
// ============================================================================

#[test]
fn test_axes_cover_half_open_range() {
    let axes = build_axes(&bbox::UNIT_SQUARE, 1000.0).unwrap();

    assert_eq!(axes.lat_values[0], 0.0);
    assert_eq!(axes.lon_values[0], 0.0);
    assert!(*axes.lat_values.last().unwrap() < 1.0);
    assert!(*axes.lon_values.last().unwrap() < 1.0);
    // one more step would leave the box
    assert!(axes.lat_values.last().unwrap() + axes.lat_step >= 1.0);
    assert!(axes.lon_values.last().unwrap() + axes.lon_step >= 1.0);
}

#[test]
fn test_unit_square_shape() {
    // one degree is ~111.2 km, so 112 cells of 1 km per axis near the equator
    let axes = build_axes(&bbox::UNIT_SQUARE, 1000.0).unwrap();
    assert_eq!(axes.rows(), 112);
    assert_eq!(axes.cols(), 112);
    assert_eq!(axes.len(), 112 * 112);
    assert_eq!(axes.bbox, bbox::UNIT_SQUARE);
}

#[test]
fn test_box_smaller_than_one_cell() {
    let tiny = BoundingBox::new(10.0, 10.0001, 20.0, 20.0001);
    let axes = build_axes(&tiny, 1000.0).unwrap();
    assert_eq!(axes.lat_values, vec![10.0]);
    assert_eq!(axes.lon_values, vec![20.0]);
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_invalid_bbox() {
    assert!(matches!(
        build_axes(&bbox::INVALID, 100.0),
        Err(GridError::InvalidBbox(_))
    ));
}

#[test]
fn test_zero_accuracy() {
    assert!(matches!(
        build_axes(&bbox::UNIT_SQUARE, 0.0),
        Err(GridError::InvalidParameter { .. })
    ));
}

#[test]
fn test_too_large() {
    // 1 m cells over a degree square is ~1.2e10 cells
    assert!(matches!(
        build_axes(&bbox::UNIT_SQUARE, 1.0),
        Err(GridError::GridTooLarge { .. })
    ));
}

//! Error types for grid processing.

use aqi_common::BboxError;
use thiserror::Error;

/// Errors that can occur while building the grid or interpolating points.
#[derive(Error, Debug)]
pub enum GridError {
    /// A numeric parameter is out of its valid range.
    #[error("invalid parameter '{param}': {message}")]
    InvalidParameter { param: &'static str, message: String },

    /// The bounding box cannot produce a grid.
    #[error("invalid bounding box: {0}")]
    InvalidBbox(#[from] BboxError),

    /// The requested grid would exceed the configured cell limit.
    #[error("grid of {rows}x{cols} cells exceeds the limit of {max_cells}")]
    GridTooLarge {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },

    /// A point reading has a NaN or infinite coordinate or value.
    #[error("point has a non-finite {field}: {value}")]
    NonFinitePoint { field: &'static str, value: f64 },

    /// A negative reading would lower cells below the baseline.
    #[error("point has a negative value: {0}")]
    NegativeValue(f64),

    /// Interpolating one point of the input failed; the whole run aborts.
    #[error("interpolation of point {index} failed: {source}")]
    PointFailed {
        index: usize,
        #[source]
        source: Box<GridError>,
    },

    /// Two grids of different shapes were combined.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The worker pool could not be started.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl GridError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            message: message.into(),
        }
    }

    /// Attach the input index of the point that failed.
    pub fn for_point(self, index: usize) -> Self {
        Self::PointFailed {
            index,
            source: Box::new(self),
        }
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridError>;

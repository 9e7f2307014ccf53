//! Grid construction and radial-decay interpolation of point readings.
//!
//! Turns a sparse set of AQI readings into a dense scalar field over a
//! rectangular region.
//!
//! # Architecture
//!
//! ```text
//! BoundingBox + accuracy_m
//!      │
//!      ▼
//! grid::build_axes ──► GridAxes (built once, shared by reference)
//!      │
//!      ▼
//! Aggregator::aggregate(points)
//!      │
//!      ├─► split points into chunks
//!      │
//!      ├─► RadialInterpolator::contribution on the worker pool
//!      │
//!      └─► Field::accumulate on the calling thread
//!               │
//!               ▼
//!          Field (baseline + Σ contributions)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{build_axes, Aggregator, AggregatorConfig, RadialInterpolator};
//!
//! let axes = build_axes(&bbox, 1000.0)?;
//! let aggregator = Aggregator::new(RadialInterpolator::new(2000.0)?, AggregatorConfig::default())?;
//! let (field, stats) = aggregator.aggregate(&axes, &points)?;
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod types;

// Re-export commonly used types at crate root
pub use aggregate::{AggregateStats, Aggregator, AggregatorConfig};
pub use config::{GridProcessorConfig, DEFAULT_BASELINE};
pub use error::{GridError, Result};
pub use grid::{build_axes, build_axes_with_limit, DEFAULT_MAX_CELLS};
pub use interpolation::RadialInterpolator;
pub use types::{ContributionGrid, Field, GridAxes};

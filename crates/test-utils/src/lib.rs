//! Shared test utilities for the AQI heatmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Bounding box fixtures
//! - Point reading generators
//! - Temporary JSON input files
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, random_points};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Assert two floats are within `eps` of each other.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $eps:expr) => {{
        let (l, r): (f64, f64) = ($left, $right);
        assert!(
            (l - r).abs() <= $eps,
            "assert_close failed: {} vs {} (eps {})",
            l,
            r,
            $eps
        );
    }};
}

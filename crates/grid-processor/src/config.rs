//! Configuration for grid construction and interpolation.

use crate::aggregate::AggregatorConfig;
use crate::grid::DEFAULT_MAX_CELLS;
use serde::{Deserialize, Serialize};

/// Background AQI assigned to every cell before contributions are added.
pub const DEFAULT_BASELINE: f64 = 10.0;

/// Configuration for the grid processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridProcessorConfig {
    /// Grid cell size in meters.
    pub accuracy_m: f64,

    /// Distance in meters at which a reading's influence reaches zero.
    pub decay_radius_m: f64,

    /// Background value of the field.
    pub baseline: f64,

    /// Largest grid (rows x cols) that will be allocated.
    pub max_cells: usize,

    /// Worker threads; `None` uses every logical CPU.
    pub workers: Option<usize>,

    /// Points per scheduled chunk; `None` derives it from the worker count.
    pub chunk_size: Option<usize>,
}

impl Default for GridProcessorConfig {
    fn default() -> Self {
        Self {
            accuracy_m: 5.0,
            decay_radius_m: 15.0,
            baseline: DEFAULT_BASELINE,
            max_cells: DEFAULT_MAX_CELLS,
            workers: None,
            chunk_size: None,
        }
    }
}

impl GridProcessorConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.accuracy_m.is_finite() || self.accuracy_m <= 0.0 {
            return Err(format!("accuracy_m must be > 0, got {}", self.accuracy_m));
        }

        if !self.decay_radius_m.is_finite() || self.decay_radius_m <= 0.0 {
            return Err(format!(
                "decay_radius_m must be > 0, got {}",
                self.decay_radius_m
            ));
        }

        if !self.baseline.is_finite() {
            return Err(format!("baseline must be finite, got {}", self.baseline));
        }

        if self.max_cells == 0 {
            return Err("max_cells must be > 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("workers must be > 0".to_string());
        }

        if self.chunk_size == Some(0) {
            return Err("chunk_size must be > 0".to_string());
        }

        Ok(())
    }

    /// Settings for the aggregation stage.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            baseline: self.baseline,
            workers: self.workers,
            chunk_size: self.chunk_size,
        }
    }
}

//! Error types for loading point readings.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using InputError.
pub type InputResult<T> = Result<T, InputError>;

/// Failures while reading the point list. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, a missing field, or a value that is not numeric.
    #[error("Invalid point data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Point {index} has a non-finite {field}: {value}")]
    NonFinite {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

impl InputError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

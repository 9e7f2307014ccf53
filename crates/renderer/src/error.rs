//! Error types for colorization and encoding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid color ramp: {0}")]
    InvalidRamp(String),

    #[error("Unrecognized color: {0}")]
    UnknownColor(String),

    #[error("Cannot render an empty field")]
    EmptyField,

    #[error("Field has {actual} values but {width}x{height} were expected")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse color ramp: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

//! Error types for pickselect-rs.

use thiserror::Error;

use crate::spatial::ObjectId;

/// The main error type for pickselect-rs operations.
#[derive(Error, Debug)]
pub enum PickError {
    /// The hit-test cascade needs a camera and none is attached.
    #[error("no camera attached - call set_camera() before picking")]
    MissingCamera,

    /// A screen or pick buffer was given a zero dimension.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// An object with the given id is not known.
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for pickselect-rs operations.
pub type Result<T> = std::result::Result<T, PickError>;

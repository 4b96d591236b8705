//! Error types for model construction.

use thiserror::Error;

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when input data violates the shape contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Keypoint sequence must contain at least one frame")]
    EmptySequence,

    #[error("Invalid frame rate: {0} (must be finite and positive)")]
    InvalidFrameRate(f64),

    #[error("Invalid keypoint: expected 2 or 3 values, got {0}")]
    InvalidKeypoint(usize),
}

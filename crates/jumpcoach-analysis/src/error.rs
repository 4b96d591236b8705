//! Error types for analysis setup.

use jumpcoach_models::ModelError;
use thiserror::Error;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur before analysis starts.
///
/// The stages themselves never fail on poor data; only invalid
/// configuration or malformed input reach this type.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    Model(#[from] ModelError),
}

impl AnalysisError {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

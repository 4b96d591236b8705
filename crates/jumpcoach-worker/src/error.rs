//! Worker error types.

use jumpcoach_analysis::AnalysisError;
use jumpcoach_models::ModelError;
use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Keypoint source failed: {0}")]
    Source(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WorkerError {
    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn invalid_job(msg: impl Into<String>) -> Self {
        Self::InvalidJob(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the job input itself was at fault, as opposed to the worker
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, WorkerError::InvalidJob(_) | WorkerError::Json(_))
    }
}

impl From<ModelError> for WorkerError {
    fn from(err: ModelError) -> Self {
        Self::InvalidJob(err.to_string())
    }
}

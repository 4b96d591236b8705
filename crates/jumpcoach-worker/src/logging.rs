//! Structured job logging utilities.
//!
//! Every line carries the job label and, once known, the video id so a
//! single run can be followed through JSON logs.

use std::path::Path;

use jumpcoach_models::VideoId;
use tracing::{error, info, Span};

use crate::error::WorkerError;
use crate::job::JobStage;

/// Job logger for structured logging with consistent fields.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job: String,
    video_id: Option<String>,
}

impl JobLogger {
    /// Create a logger for a job identified by `job` (usually its source).
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            video_id: None,
        }
    }

    /// Attach the video id once the job input is known.
    pub fn set_video_id(&mut self, video_id: &VideoId) {
        self.video_id = Some(video_id.to_string());
    }

    fn video(&self) -> &str {
        self.video_id.as_deref().unwrap_or("-")
    }

    pub fn log_start(&self) {
        info!(job = %self.job, "Job started");
    }

    pub fn log_stage(&self, stage: JobStage) {
        info!(job = %self.job, video_id = %self.video(), stage = %stage, "Job stage");
    }

    pub fn log_failure(&self, stage: JobStage, err: &WorkerError) {
        error!(
            job = %self.job,
            video_id = %self.video(),
            stage = %stage,
            error = %err,
            input_error = err.is_input_error(),
            "Job failed"
        );
    }

    pub fn log_completion(&self, summary_path: &Path) {
        info!(
            job = %self.job,
            video_id = %self.video(),
            summary = %summary_path.display(),
            "Job completed"
        );
    }

    /// Create a tracing span covering the whole job.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("job", job = %self.job)
    }
}

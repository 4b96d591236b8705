//! Job input and lifecycle records.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use jumpcoach_analysis::AnalysisStage;
use jumpcoach_models::{KeypointFrame, VideoId};
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;

/// A keypoint analysis job as handed to the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointJob {
    /// Video the keypoints were extracted from. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<VideoId>,

    /// Sampling rate of `keypoints`. The worker default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Per-frame pose estimates, 17 joints each.
    pub keypoints: Vec<KeypointFrame>,
}

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Queued,
    Processing,
    Done,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing stage a job is in, reported as the prefix of failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Load,
    Smooth,
    Events,
    Metrics,
    Recommend,
    WriteReport,
}

impl JobStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStage::Load => "load",
            JobStage::Smooth => "smooth",
            JobStage::Events => "events",
            JobStage::Metrics => "metrics",
            JobStage::Recommend => "recommend",
            JobStage::WriteReport => "write_report",
        }
    }
}

impl From<AnalysisStage> for JobStage {
    fn from(stage: AnalysisStage) -> Self {
        match stage {
            AnalysisStage::Smooth => JobStage::Smooth,
            AnalysisStage::Events => JobStage::Events,
            AnalysisStage::Metrics => JobStage::Metrics,
            AnalysisStage::Recommend => JobStage::Recommend,
        }
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JobRecord {
    /// Known once the job input has been loaded
    #[serde(default)]
    pub video_id: Option<VideoId>,

    #[serde(default)]
    pub status: JobStatus,

    /// `"{stage}: {reason}"` for failed jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// A fresh queued record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip to processing, clearing any previous error.
    pub fn start(&mut self) {
        self.status = JobStatus::Processing;
        self.error_message = None;
    }

    /// Mark the job done with its written report.
    pub fn complete(&mut self, summary_path: PathBuf) {
        self.status = JobStatus::Done;
        self.summary_path = Some(summary_path);
        self.completed_at = Some(Utc::now());
    }

    /// Mark the job failed at `stage`.
    pub fn fail(&mut self, stage: JobStage, err: &WorkerError) {
        self.status = JobStatus::Failed;
        self.error_message = Some(format!("{stage}: {err}"));
        self.completed_at = Some(Utc::now());
    }
}

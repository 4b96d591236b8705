//! Where keypoint jobs come from.
//!
//! Pose estimation happens upstream; the worker only sees its output through
//! a [`KeypointSource`], so a model-backed source can be swapped in without
//! touching the processor.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{WorkerError, WorkerResult};
use crate::job::KeypointJob;

/// Supplier of one keypoint job.
pub trait KeypointSource {
    /// Short label used in logs.
    fn describe(&self) -> String;

    /// Load the job.
    fn load(&self) -> WorkerResult<KeypointJob>;
}

/// Reads a job from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeypointSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> WorkerResult<KeypointJob> {
        let bytes = fs::read(&self.path).map_err(|e| {
            WorkerError::source_failed(format!("{}: {e}", self.path.display()))
        })?;
        let job: KeypointJob = serde_json::from_slice(&bytes)?;
        debug!(
            path = %self.path.display(),
            frames = job.keypoints.len(),
            "Loaded keypoint job"
        );
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_source_error() {
        let source = JsonFileSource::new("/nonexistent/jump.json");
        let err = source.load().unwrap_err();
        assert!(matches!(err, WorkerError::Source(_)));
        assert!(err.to_string().contains("/nonexistent/jump.json"));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        fs::write(&path, b"{\"keypoints\": [[1, 2]]").unwrap();

        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, WorkerError::Json(_)));
    }

    #[test]
    fn test_loads_job() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        let frame = vec![[10.0, 20.0, 0.8]; 17];
        let json = serde_json::json!({ "videoId": "abc", "keypoints": [frame] });
        fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(source.describe(), path.display().to_string());
        let job = source.load().unwrap();
        assert_eq!(job.keypoints.len(), 1);
        assert_eq!(job.fps, None);
    }
}

//! Job processing: load, analyse, write the report.

use std::fs;
use std::path::PathBuf;

use jumpcoach_analysis::JumpAnalyzer;
use jumpcoach_models::{AnalysisReport, FrameRate, KeypointSequence, VideoId};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::job::{JobRecord, JobStage};
use crate::logging::JobLogger;
use crate::source::KeypointSource;

/// Runs keypoint jobs end to end.
#[derive(Debug, Clone)]
pub struct JobProcessor {
    config: WorkerConfig,
    analyzer: JumpAnalyzer,
}

impl JobProcessor {
    pub fn new(config: WorkerConfig) -> WorkerResult<Self> {
        let analyzer = JumpAnalyzer::new(config.analysis.clone())?;
        Ok(Self { config, analyzer })
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Process one job. Never fails: the outcome is in the returned record.
    pub fn process(&self, source: &dyn KeypointSource) -> JobRecord {
        let mut logger = JobLogger::new(source.describe());
        let span = logger.create_span();
        let _guard = span.enter();

        let mut record = JobRecord::new();
        record.start();
        logger.log_start();

        let mut stage = JobStage::Load;
        match self.run(source, &mut record, &mut logger, &mut stage) {
            Ok(summary_path) => {
                logger.log_completion(&summary_path);
                record.complete(summary_path);
            }
            Err(e) => {
                logger.log_failure(stage, &e);
                record.fail(stage, &e);
            }
        }
        record
    }

    fn run(
        &self,
        source: &dyn KeypointSource,
        record: &mut JobRecord,
        logger: &mut JobLogger,
        stage: &mut JobStage,
    ) -> WorkerResult<PathBuf> {
        let job = source.load()?;
        let video_id = job.video_id.unwrap_or_default();
        self.config.summary_path(&video_id)?;
        record.video_id = Some(video_id.clone());
        logger.set_video_id(&video_id);

        let fps = FrameRate::new(job.fps.unwrap_or(self.config.default_fps))?;
        let keypoints = KeypointSequence::new(job.keypoints)?;

        let report = self
            .analyzer
            .analyze_observed(&keypoints, fps, |step| {
                *stage = JobStage::from(step);
                logger.log_stage(*stage);
            })
            .with_video_id(video_id.clone());

        *stage = JobStage::WriteReport;
        logger.log_stage(*stage);
        self.write_report(&video_id, &report)
    }

    /// Write `report` to its summary path, replacing any previous one.
    pub fn write_report(&self, video_id: &VideoId, report: &AnalysisReport) -> WorkerResult<PathBuf> {
        let path = self.config.summary_path(video_id)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_json::to_vec_pretty(report)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkerError;
    use crate::job::{JobStatus, KeypointJob};
    use jumpcoach_models::KeypointFrame;

    struct FixedSource(Option<KeypointJob>);

    impl KeypointSource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        fn load(&self) -> WorkerResult<KeypointJob> {
            self.0
                .clone()
                .ok_or_else(|| WorkerError::source_failed("pose model unavailable"))
        }
    }

    fn processor(dir: &std::path::Path) -> JobProcessor {
        JobProcessor::new(WorkerConfig::default().with_output_dir(dir)).unwrap()
    }

    fn job(video_id: Option<&str>, fps: Option<f64>, frames: usize) -> KeypointJob {
        KeypointJob {
            video_id: video_id.map(VideoId::from),
            fps,
            keypoints: vec![KeypointFrame::missing(); frames],
        }
    }

    #[test]
    fn test_processes_job_and_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let record = processor(dir.path()).process(&FixedSource(Some(job(Some("v1"), None, 12))));

        assert_eq!(record.status, JobStatus::Done);
        assert_eq!(record.video_id, Some(VideoId::from("v1")));
        let path = record.summary_path.unwrap();
        assert_eq!(path, dir.path().join("processed/v1/summary.json"));

        let report: AnalysisReport = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(report.video_id, Some(VideoId::from("v1")));
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn test_generates_video_id_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let record = processor(dir.path()).process(&FixedSource(Some(job(None, Some(60.0), 3))));
        assert_eq!(record.status, JobStatus::Done);
        assert!(!record.video_id.unwrap().as_str().is_empty());
    }

    #[test]
    fn test_source_failure_reported_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let record = processor(dir.path()).process(&FixedSource(None));
        assert_eq!(record.status, JobStatus::Failed);
        assert_eq!(record.video_id, None);
        assert_eq!(
            record.error_message.as_deref(),
            Some("load: Keypoint source failed: pose model unavailable")
        );
    }

    #[test]
    fn test_empty_and_bad_rate_jobs_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor(dir.path());

        let record = processor.process(&FixedSource(Some(job(Some("e"), None, 0))));
        assert_eq!(record.status, JobStatus::Failed);
        assert!(record.error_message.unwrap().starts_with("load: Invalid job"));

        let record = processor.process(&FixedSource(Some(job(Some("r"), Some(-1.0), 5))));
        assert_eq!(record.status, JobStatus::Failed);
        assert!(record.error_message.unwrap().starts_with("load: Invalid job"));
        assert_eq!(record.video_id, Some(VideoId::from("r")));
    }

    #[test]
    fn test_video_ids_that_leave_output_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let processor = processor(&out);
        let absolute = dir.path().join("abs");

        for id in ["../escaped", absolute.to_str().unwrap()] {
            let record = processor.process(&FixedSource(Some(job(Some(id), None, 4))));
            assert_eq!(record.status, JobStatus::Failed, "{id}");
            assert!(record.error_message.unwrap().starts_with("load: Invalid job"));
            assert_eq!(record.video_id, None);
        }
        assert!(!dir.path().join("escaped").exists());
        assert!(!absolute.exists());
        assert!(!out.exists());
    }

    #[test]
    fn test_write_failure_reported_at_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"not a directory").unwrap();

        let record = processor(&blocker).process(&FixedSource(Some(job(Some("w"), None, 4))));
        assert_eq!(record.status, JobStatus::Failed);
        assert!(record.error_message.unwrap().starts_with("write_report: IO error"));
    }
}

//! Worker configuration.

use std::path::{Component, Path, PathBuf};

use jumpcoach_analysis::AnalysisConfig;
use jumpcoach_models::{FrameRate, VideoId};

use crate::error::{WorkerError, WorkerResult};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root directory for generated reports
    pub output_dir: PathBuf,
    /// Frame rate assumed for jobs that do not carry one
    pub default_fps: f64,
    /// Analysis tuning
    pub analysis: AnalysisConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            default_fps: 30.0,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to their defaults; the result is
    /// validated before it is returned.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> WorkerResult<Self> {
        let defaults = Self::default();

        let mut analysis = defaults.analysis;
        if let Some(conf) = lookup("ANALYSIS_MIN_CONFIDENCE").and_then(|s| s.parse().ok()) {
            analysis = analysis.with_min_confidence(conf);
        }
        if let Some(window) = lookup("ANALYSIS_SMOOTHING_WINDOW").and_then(|s| s.parse().ok()) {
            analysis = analysis.with_smoothing_window(window);
        }

        let config = Self {
            output_dir: lookup("WORKER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            default_fps: lookup("WORKER_DEFAULT_FPS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_fps),
            analysis,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn validate(&self) -> WorkerResult<()> {
        FrameRate::new(self.default_fps)
            .map_err(|e| WorkerError::config_error(format!("WORKER_DEFAULT_FPS: {e}")))?;
        self.analysis
            .validate()
            .map_err(|e| WorkerError::config_error(e.to_string()))?;
        Ok(())
    }

    /// Where the report for `video_id` is written.
    ///
    /// The id must be a single plain path component so the report stays
    /// under `{output_dir}/processed/`.
    pub fn summary_path(&self, video_id: &VideoId) -> WorkerResult<PathBuf> {
        let mut components = Path::new(video_id.as_str()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == video_id.as_str() => Ok(self
                .output_dir
                .join("processed")
                .join(name)
                .join("summary.json")),
            _ => Err(WorkerError::invalid_job(format!(
                "videoId {:?} is not a plain file name",
                video_id.as_str()
            ))),
        }
    }
}

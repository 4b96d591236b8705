//! End-to-end analysis of one jump.

use jumpcoach_models::{AnalysisReport, FrameRate, KeypointFrame, KeypointSequence};
use tracing::{debug, info_span};

use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::events::EventDetector;
use crate::metrics::MetricsComputer;
use crate::recommend::RecommendationEngine;
use crate::smoother::KeypointSmoother;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    Smooth,
    Events,
    Metrics,
    Recommend,
}

/// Runs smoothing, event detection, metrics and recommendations in order.
#[derive(Debug, Clone)]
pub struct JumpAnalyzer {
    smoother: KeypointSmoother,
    detector: EventDetector,
    metrics: MetricsComputer,
    recommender: RecommendationEngine,
}

impl JumpAnalyzer {
    /// Create an analyzer after validating the configuration.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self {
            smoother: KeypointSmoother::new(&config),
            detector: EventDetector::new(&config),
            metrics: MetricsComputer::new(&config),
            recommender: RecommendationEngine::new(&config),
        })
    }

    pub fn smoother(&self) -> &KeypointSmoother {
        &self.smoother
    }

    pub fn detector(&self) -> &EventDetector {
        &self.detector
    }

    pub fn metrics(&self) -> &MetricsComputer {
        &self.metrics
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    /// Analyse one keypoint sequence.
    pub fn analyze(&self, keypoints: &KeypointSequence, fps: FrameRate) -> AnalysisReport {
        self.analyze_observed(keypoints, fps, |_| {})
    }

    /// Analyse one keypoint sequence, calling `on_stage` as each stage begins.
    pub fn analyze_observed(
        &self,
        keypoints: &KeypointSequence,
        fps: FrameRate,
        mut on_stage: impl FnMut(AnalysisStage),
    ) -> AnalysisReport {
        let span = info_span!("analyze_jump", frames = keypoints.len(), fps = fps.fps());
        let _guard = span.enter();

        on_stage(AnalysisStage::Smooth);
        let smoothed = self.smoother.smooth(keypoints);
        if !smoothed.missing_channels.is_empty() {
            debug!(
                count = smoothed.missing_channels.len(),
                "Channels without trusted samples"
            );
        }

        on_stage(AnalysisStage::Events);
        let events = self.detector.detect(&smoothed.keypoints, fps);

        on_stage(AnalysisStage::Metrics);
        let metrics = self.metrics.compute(&smoothed.keypoints, &events, fps);

        on_stage(AnalysisStage::Recommend);
        let recommendations = self.recommender.recommend(&metrics);

        AnalysisReport::new(events, metrics, recommendations)
    }

    /// Validate raw frames and frame rate, then analyse them.
    pub fn analyze_frames(&self, frames: Vec<KeypointFrame>, fps: f64) -> AnalysisResult<AnalysisReport> {
        let keypoints = KeypointSequence::new(frames)?;
        let fps = FrameRate::new(fps)?;
        Ok(self.analyze(&keypoints, fps))
    }
}

impl Default for JumpAnalyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            smoother: KeypointSmoother::new(&config),
            detector: EventDetector::new(&config),
            metrics: MetricsComputer::new(&config),
            recommender: RecommendationEngine::new(&config),
        }
    }
}

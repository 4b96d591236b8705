//! Canonical analysis report envelope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::events::EventSet;
use crate::metrics::MetricsReport;
use crate::recommendation::Recommendation;

/// Identifier of the video an analysis run belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Everything one analysis run produces, in the shape downstream
/// persistence expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Video this report belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<VideoId>,

    /// Detected event frame indices
    pub key_frames: EventSet,

    /// Angles and timing measured at the events
    pub metrics: MetricsReport,

    /// Drills in rule order
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn new(
        key_frames: EventSet,
        metrics: MetricsReport,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            video_id: None,
            key_frames,
            metrics,
            recommendations,
        }
    }

    /// Attach the video identifier.
    pub fn with_video_id(mut self, video_id: VideoId) -> Self {
        self.video_id = Some(video_id);
        self
    }
}

//! Shared data models for jump-shot analysis.
//!
//! This crate provides Serde-serializable types for:
//! - Body joints and per-frame keypoints
//! - Keypoint sequences and frame rates
//! - Detected jump events
//! - Metrics reports and coaching recommendations
//! - The canonical analysis report envelope

pub mod error;
pub mod events;
pub mod joint;
pub mod keypoint;
pub mod metrics;
pub mod recommendation;
pub mod report;
pub mod sequence;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use events::EventSet;
pub use joint::{Joint, JOINT_COUNT};
pub use keypoint::{Axis, Keypoint, KeypointFrame, Point2};
pub use metrics::{AngleMetrics, MetricsReport, TimingMetrics};
pub use recommendation::{Drill, Recommendation};
pub use report::{AnalysisReport, VideoId};
pub use sequence::{FrameRate, KeypointSequence};

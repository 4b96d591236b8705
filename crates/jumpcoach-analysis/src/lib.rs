#![deny(unreachable_patterns)]
//! Jump-shot biomechanics analysis.
//!
//! This crate turns a per-frame body keypoint sequence into coaching feedback:
//! - Gap filling and Savitzky-Golay smoothing of joint trajectories
//! - Heuristic detection of plant, max countermovement, takeoff and apex
//! - Joint-angle and timing metrics at those events
//! - Threshold rules mapping metrics to training drills
//!
//! # Architecture
//!
//! ```text
//! KeypointSequence
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │   KeypointSmoother   │ ← Fill gaps, low-pass filter x/y
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │    EventDetector     │ ← plant / max_cm / takeoff / apex
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │   MetricsComputer    │ ← Angles and timing at events
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ RecommendationEngine │ ← Drills in fixed rule order
//! └──────────┬───────────┘
//!            │
//!            ▼
//!      AnalysisReport
//! ```
//!
//! Every stage is synchronous and pure: missing or low-confidence data
//! degrades to `None` values and documented fallbacks instead of errors.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod metrics;
pub mod recommend;
pub mod signal;
pub mod smoother;

pub use analyzer::{AnalysisStage, JumpAnalyzer};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use events::EventDetector;
pub use geometry::{angle_at, ANGLE_EPSILON};
pub use metrics::MetricsComputer;
pub use recommend::RecommendationEngine;
pub use smoother::{KeypointSmoother, MissingChannel, SmoothedKeypoints};

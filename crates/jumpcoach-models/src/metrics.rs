//! Biomechanical metrics measured at the detected events.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Joint angles in degrees. `None` means the angle could not be measured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AngleMetrics {
    /// Peak elbow-shoulder-hip angle at takeoff (either side).
    pub arm_cock_peak_deg: Option<f64>,
    /// Peak shoulder-elbow-wrist angle at takeoff (either side).
    pub elbow_extension_peak_deg: Option<f64>,
    /// Deviation of the hip-to-shoulder vector from vertical at plant.
    pub torso_lean_deg: Option<f64>,
    /// Bilateral knee angle at maximum countermovement. Not part of the wire format.
    #[serde(skip)]
    pub knee_flex_deg: Option<f64>,
}

/// Timing and approach-step metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TimingMetrics {
    /// Penultimate approach step length divided by the last step length.
    pub penultimate_last_ratio: Option<f64>,
    /// Seconds from takeoff to apex.
    pub jump_time_s: f64,
    /// Seconds from plant to apex.
    pub time_to_contact_s: f64,
}

/// Metrics for one analysed jump.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MetricsReport {
    pub angles: AngleMetrics,
    pub timing: TimingMetrics,
}

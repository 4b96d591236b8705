//! Configuration for the jump analysis pipeline.
//!
//! The defaults reproduce the tuning used in production: a 0.25 confidence
//! floor, a 9-sample smoothing window and coaching thresholds of 18° torso
//! lean, 115° arm cock and a 1.2 step ratio.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Configuration for smoothing, event detection and recommendation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // === Smoothing ===
    /// Minimum detection confidence for a coordinate to be trusted (0.0-1.0).
    ///
    /// Samples below this are treated as gaps and re-filled by interpolation.
    pub min_confidence: f64,

    /// Target Savitzky-Golay window length in frames (odd).
    ///
    /// Shorter sequences use the largest odd window that fits; windows
    /// below 5 frames skip filtering entirely.
    pub smoothing_window: usize,

    // === Event Detection ===
    /// How far before takeoff to search for the plant frame (seconds).
    pub plant_search_secs: f64,

    /// Frames before takeoff used as plant when the search finds nothing.
    pub plant_fallback_frames: usize,

    // === Metrics ===
    /// Minimum spacing between approach-step peaks (seconds).
    pub step_peak_spacing_secs: f64,

    // === Recommendation Thresholds ===
    /// Torso lean above this triggers the torso control drill (degrees).
    pub max_torso_lean_deg: f64,

    /// Arm cock below this triggers the arm mechanics drill (degrees).
    pub min_arm_cock_deg: f64,

    /// Step ratio below this triggers the approach steps drill.
    pub min_step_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.25,
            smoothing_window: 9,
            plant_search_secs: 0.5,
            plant_fallback_frames: 3,
            step_peak_spacing_secs: 0.1,
            max_torso_lean_deg: 18.0,
            min_arm_cock_deg: 115.0,
            min_step_ratio: 1.2,
        }
    }
}

impl AnalysisConfig {
    /// Builder-style setter for the confidence floor.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Builder-style setter for the smoothing window.
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Builder-style setter for the plant search window.
    pub fn with_plant_search_secs(mut self, secs: f64) -> Self {
        self.plant_search_secs = secs;
        self
    }

    /// Builder-style setter for the step peak spacing.
    pub fn with_step_peak_spacing_secs(mut self, secs: f64) -> Self {
        self.step_peak_spacing_secs = secs;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AnalysisError::invalid_config(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.smoothing_window < 3 || self.smoothing_window % 2 == 0 {
            return Err(AnalysisError::invalid_config(format!(
                "smoothing_window must be odd and at least 3, got {}",
                self.smoothing_window
            )));
        }
        for (name, value) in [
            ("plant_search_secs", self.plant_search_secs),
            ("step_peak_spacing_secs", self.step_peak_spacing_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::invalid_config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("max_torso_lean_deg", self.max_torso_lean_deg),
            ("min_arm_cock_deg", self.min_arm_cock_deg),
            ("min_step_ratio", self.min_step_ratio),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

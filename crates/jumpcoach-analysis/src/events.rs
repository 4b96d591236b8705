//! Jump event detection.
//!
//! Events are located with simple heuristics over the smoothed hip, ankle
//! and knee trajectories:
//!
//! - **apex**: highest mean hip position (smallest image y)
//! - **takeoff**: fastest upward ankle motion
//! - **plant**: first hip descent in the half second before takeoff
//! - **max_cm**: deepest knee bend between plant and takeoff
//!
//! Each heuristic has a fallback so detection always produces an ordered
//! [`EventSet`], even when every joint is missing.

use jumpcoach_models::{Axis, EventSet, FrameRate, Joint, KeypointSequence};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::geometry::{knee_angle, pair_mean};
use crate::signal::{argmin_present, first_positive, gradient};

/// Detects plant, max countermovement, takeoff and apex frames.
#[derive(Debug, Clone)]
pub struct EventDetector {
    plant_search_secs: f64,
    plant_fallback_frames: usize,
}

impl EventDetector {
    /// Create a detector from the analysis configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            plant_search_secs: config.plant_search_secs,
            plant_fallback_frames: config.plant_fallback_frames,
        }
    }

    /// Detect the four events in a smoothed sequence.
    pub fn detect(&self, keypoints: &KeypointSequence, fps: FrameRate) -> EventSet {
        let hip_y = mean_pair_channel(keypoints, Joint::LeftHip, Joint::RightHip);
        let ankle_y = mean_pair_channel(keypoints, Joint::LeftAnkle, Joint::RightAnkle);

        let apex = argmin_present(&hip_y).unwrap_or_else(|| {
            debug!(frames = keypoints.len(), "Hip height missing everywhere; apex defaults to 0");
            0
        });

        // Image y grows downward, so the most negative velocity is the fastest rise.
        let ankle_velocity = gradient(&ankle_y);
        let takeoff = argmin_present(&ankle_velocity).unwrap_or_else(|| {
            debug!(frames = keypoints.len(), "Ankle velocity missing everywhere; takeoff defaults to 0");
            0
        });

        let plant = self.find_plant(&hip_y, takeoff, fps);
        let max_cm = find_max_countermovement(keypoints, plant, takeoff);

        let events = EventSet::new(plant, max_cm, takeoff, apex).normalized(keypoints.len());
        debug!(
            plant = events.plant,
            max_cm = events.max_cm,
            takeoff = events.takeoff,
            apex = events.apex,
            "Detected jump events"
        );
        events
    }

    /// First frame in the search window before takeoff where the hips start
    /// descending.
    fn find_plant(&self, hip_y: &[Option<f64>], takeoff: usize, fps: FrameRate) -> usize {
        let fallback = takeoff.saturating_sub(self.plant_fallback_frames);
        let start = takeoff.saturating_sub(fps.frames_in(self.plant_search_secs));
        if start >= takeoff {
            debug!(takeoff, fallback, "Empty plant search window");
            return fallback;
        }

        let hip_velocity = gradient(hip_y);
        match first_positive(&hip_velocity[start..takeoff]) {
            Some(offset) => start + offset,
            None => {
                debug!(start, takeoff, fallback, "No hip descent before takeoff");
                fallback
            }
        }
    }
}

impl Default for EventDetector {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// Frame of deepest knee flexion within `[plant, takeoff)`, or `plant`.
fn find_max_countermovement(keypoints: &KeypointSequence, plant: usize, takeoff: usize) -> usize {
    if plant >= takeoff {
        return plant;
    }

    let angles: Vec<Option<f64>> = keypoints.frames()[plant..takeoff]
        .iter()
        .map(knee_angle)
        .collect();
    match argmin_present(&angles) {
        Some(offset) => plant + offset,
        None => {
            debug!(plant, takeoff, "Knee angles missing before takeoff; max_cm defaults to plant");
            plant
        }
    }
}

/// Per-frame mean image y of a left/right joint pair.
fn mean_pair_channel(keypoints: &KeypointSequence, left: Joint, right: Joint) -> Vec<Option<f64>> {
    keypoints
        .frames()
        .iter()
        .map(|frame| pair_mean(frame, left, right, Axis::Y))
        .collect()
}

//! Joint trajectory cleaning.
//!
//! Pose estimates jitter from frame to frame and drop joints entirely when
//! the model is unsure. Each joint's x and y trajectories are cleaned
//! independently: untrusted samples are re-filled by linear interpolation
//! and the result is low-pass filtered with a quadratic Savitzky-Golay
//! filter. Confidences pass through untouched.

use jumpcoach_models::{Axis, Joint, KeypointSequence};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::signal::{fitted_window, interpolate_gaps, savgol_smooth};

/// Smallest window that still fits a quadratic meaningfully.
const MIN_FILTER_WINDOW: usize = 5;

/// A joint channel with no trusted sample, left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingChannel {
    pub joint: Joint,
    pub axis: Axis,
}

/// Output of [`KeypointSmoother::smooth`].
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedKeypoints {
    /// Cleaned sequence, same shape as the input.
    pub keypoints: KeypointSequence,
    /// Channels that could not be recovered.
    pub missing_channels: Vec<MissingChannel>,
}

/// Keypoint trajectory smoother.
#[derive(Debug, Clone)]
pub struct KeypointSmoother {
    min_confidence: f64,
    target_window: usize,
}

impl KeypointSmoother {
    /// Create a smoother from the analysis configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            target_window: config.smoothing_window,
        }
    }

    /// Clean every joint channel of a sequence.
    ///
    /// Never fails: channels without a single trusted sample are reported in
    /// [`SmoothedKeypoints::missing_channels`] and left unchanged.
    pub fn smooth(&self, keypoints: &KeypointSequence) -> SmoothedKeypoints {
        let window = self.filter_window(keypoints.len());
        debug!(
            frames = keypoints.len(),
            window = window.unwrap_or(0),
            "Smoothing keypoints"
        );

        let mut cleaned = keypoints.clone();
        let mut missing_channels = Vec::new();

        for joint in Joint::ALL {
            for axis in Axis::ALL {
                let trusted: Vec<Option<f64>> = keypoints
                    .frames()
                    .iter()
                    .map(|frame| {
                        let kp = frame[joint];
                        kp.coord(axis).filter(|_| kp.is_confident(self.min_confidence))
                    })
                    .collect();

                let Some(filled) = interpolate_gaps(&trusted) else {
                    warn!(joint = %joint, axis = axis.as_str(), "No trusted samples; channel left as-is");
                    missing_channels.push(MissingChannel { joint, axis });
                    continue;
                };

                let smoothed = match window {
                    Some(w) => savgol_smooth(&filled, w),
                    None => filled,
                };
                let values: Vec<Option<f64>> = smoothed.into_iter().map(Some).collect();
                cleaned = cleaned.with_channel(joint, axis, &values);
            }
        }

        SmoothedKeypoints {
            keypoints: cleaned,
            missing_channels,
        }
    }

    /// Filter window for a sequence of `len` frames, or `None` to skip filtering.
    pub fn filter_window(&self, len: usize) -> Option<usize> {
        let window = fitted_window(self.target_window, len);
        (window >= MIN_FILTER_WINDOW).then_some(window)
    }
}

impl Default for KeypointSmoother {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

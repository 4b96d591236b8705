//! Keypoint sequences and frame rates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::joint::Joint;
use crate::keypoint::{Axis, KeypointFrame};

/// Ordered, non-empty sequence of keypoint frames for one analysis run.
///
/// The non-empty guarantee is established at construction, so analysis
/// stages can always index frame `0` and `len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeypointFrame>", into = "Vec<KeypointFrame>")]
pub struct KeypointSequence {
    frames: Vec<KeypointFrame>,
}

impl KeypointSequence {
    /// Create a sequence, rejecting an empty frame list.
    pub fn new(frames: Vec<KeypointFrame>) -> ModelResult<Self> {
        if frames.is_empty() {
            return Err(ModelError::EmptySequence);
        }
        Ok(Self { frames })
    }

    /// Number of frames (always at least one).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[KeypointFrame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&KeypointFrame> {
        self.frames.get(index)
    }

    /// Per-frame values of one coordinate of one joint.
    pub fn channel(&self, joint: Joint, axis: Axis) -> Vec<Option<f64>> {
        self.frames.iter().map(|f| f[joint].coord(axis)).collect()
    }

    /// Per-frame detection confidences of one joint.
    pub fn confidences(&self, joint: Joint) -> Vec<Option<f64>> {
        self.frames.iter().map(|f| f[joint].confidence).collect()
    }

    /// Copy of this sequence with one channel replaced.
    ///
    /// `values` must have one entry per frame; extra entries are ignored and
    /// frames beyond the end of `values` keep their coordinate.
    pub fn with_channel(&self, joint: Joint, axis: Axis, values: &[Option<f64>]) -> Self {
        let mut frames = self.frames.clone();
        for (frame, value) in frames.iter_mut().zip(values) {
            frame[joint] = frame[joint].with_coord(axis, *value);
        }
        Self { frames }
    }
}

impl TryFrom<Vec<KeypointFrame>> for KeypointSequence {
    type Error = ModelError;

    fn try_from(frames: Vec<KeypointFrame>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<KeypointSequence> for Vec<KeypointFrame> {
    fn from(seq: KeypointSequence) -> Self {
        seq.frames
    }
}

/// Sampling rate of a keypoint sequence in frames per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create a frame rate, rejecting non-finite or non-positive values.
    pub fn new(fps: f64) -> ModelResult<Self> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(ModelError::InvalidFrameRate(fps))
        }
    }

    pub fn fps(&self) -> f64 {
        self.0
    }

    /// Whole number of frames spanning `seconds`, truncated toward zero.
    pub fn frames_in(&self, seconds: f64) -> usize {
        (self.0 * seconds).max(0.0) as usize
    }

    /// Elapsed seconds for a frame count.
    pub fn seconds(&self, frames: usize) -> f64 {
        frames as f64 / self.0
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = ModelError;

    fn try_from(fps: f64) -> Result<Self, Self::Error> {
        Self::new(fps)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.0)
    }
}

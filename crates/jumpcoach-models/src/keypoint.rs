//! Per-frame keypoint models.
//!
//! Missing coordinates are explicit `None` values rather than NaN, so a
//! missing joint can never silently flow through arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::error::ModelError;
use crate::joint::{Joint, JOINT_COUNT};

/// A 2D point in image pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to this point.
    pub fn sub(self, origin: Point2) -> Point2 {
        Point2::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length of this point seen as a vector.
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Spatial channel of a keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Spatial channels in processing order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// Wire form of a keypoint: `[x, y, confidence]` with `null` for missing values.
type KeypointTriple = [Option<f64>; 3];

/// A single joint detection: pixel position plus detection confidence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<f64>>", into = "KeypointTriple")]
pub struct Keypoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub confidence: Option<f64>,
}

impl Keypoint {
    /// A keypoint with every channel missing.
    pub const MISSING: Keypoint = Keypoint {
        x: None,
        y: None,
        confidence: None,
    };

    /// Create a fully detected keypoint.
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self::from_raw(x, y, confidence)
    }

    /// Create a keypoint from raw model output, mapping non-finite values to `None`.
    pub fn from_raw(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            x: finite(x),
            y: finite(y),
            confidence: finite(confidence),
        }
    }

    /// Coordinate for the given axis.
    pub fn coord(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Copy of this keypoint with one coordinate replaced.
    pub fn with_coord(mut self, axis: Axis, value: Option<f64>) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
        self
    }

    /// Position if both coordinates are present.
    pub fn position(&self) -> Option<Point2> {
        Some(Point2::new(self.x?, self.y?))
    }

    /// Whether the detection confidence is present and at least `min_confidence`.
    pub fn is_confident(&self, min_confidence: f64) -> bool {
        self.confidence.is_some_and(|c| c >= min_confidence)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl TryFrom<Vec<Option<f64>>> for Keypoint {
    type Error = ModelError;

    fn try_from(values: Vec<Option<f64>>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            // Some pose models omit scores; treat the position as fully confident.
            [x, y] => Ok(Self {
                x: *x,
                y: *y,
                confidence: Some(1.0),
            }),
            [x, y, c] => Ok(Self {
                x: *x,
                y: *y,
                confidence: *c,
            }),
            other => Err(ModelError::InvalidKeypoint(other.len())),
        }
    }
}

impl From<Keypoint> for KeypointTriple {
    fn from(kp: Keypoint) -> Self {
        [kp.x, kp.y, kp.confidence]
    }
}

/// All joint detections for one sampled video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointFrame([Keypoint; JOINT_COUNT]);

impl KeypointFrame {
    pub fn new(keypoints: [Keypoint; JOINT_COUNT]) -> Self {
        Self(keypoints)
    }

    /// A frame where the pose model detected nothing.
    pub fn missing() -> Self {
        Self([Keypoint::MISSING; JOINT_COUNT])
    }

    /// Builder-style setter for one joint.
    pub fn with(mut self, joint: Joint, keypoint: Keypoint) -> Self {
        self[joint] = keypoint;
        self
    }

    pub fn keypoints(&self) -> &[Keypoint; JOINT_COUNT] {
        &self.0
    }

    /// Position of a joint if both coordinates are present.
    pub fn position(&self, joint: Joint) -> Option<Point2> {
        self[joint].position()
    }
}

impl Default for KeypointFrame {
    fn default() -> Self {
        Self::missing()
    }
}

impl Index<Joint> for KeypointFrame {
    type Output = Keypoint;

    fn index(&self, joint: Joint) -> &Keypoint {
        &self.0[joint.slot()]
    }
}

impl IndexMut<Joint> for KeypointFrame {
    fn index_mut(&mut self, joint: Joint) -> &mut Keypoint {
        &mut self.0[joint.slot()]
    }
}

//! Joint angle geometry.

use jumpcoach_models::{Axis, Joint, Keypoint, KeypointFrame, Point2};

use crate::signal::{max_present, mean_present};

/// Lower bound on the product of limb vector lengths in [`angle_at`].
pub const ANGLE_EPSILON: f64 = 1e-8;

/// Angle at vertex `b` formed by `a-b-c`, in degrees within `[0, 180]`.
///
/// Returns `None` if any point is missing. Degenerate (zero-length) limbs
/// yield 90°.
pub fn angle_at(a: Option<Point2>, b: Option<Point2>, c: Option<Point2>) -> Option<f64> {
    let (a, b, c) = (a?, b?, c?);
    let ba = a.sub(b);
    let bc = c.sub(b);
    let cos = ba.dot(bc) / (ba.norm() * bc.norm()).max(ANGLE_EPSILON);
    Some(cos.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Angle at joint `b` in one frame.
pub fn joint_angle(frame: &KeypointFrame, a: Joint, b: Joint, c: Joint) -> Option<f64> {
    angle_at(frame.position(a), frame.position(b), frame.position(c))
}

/// Mean hip-knee-ankle angle over both legs, ignoring a missing side.
pub fn knee_angle(frame: &KeypointFrame) -> Option<f64> {
    mean_present(&[
        joint_angle(frame, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
        joint_angle(frame, Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
    ])
}

/// Larger of a left/right angle pair, ignoring a missing side.
pub fn peak_bilateral(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    max_present(&[left, right])
}

/// Per-coordinate mean of several keypoints, ignoring missing coordinates.
pub fn mean_position(keypoints: &[Keypoint]) -> Option<Point2> {
    let xs: Vec<Option<f64>> = keypoints.iter().map(|kp| kp.x).collect();
    let ys: Vec<Option<f64>> = keypoints.iter().map(|kp| kp.y).collect();
    Some(Point2::new(mean_present(&xs)?, mean_present(&ys)?))
}

/// Mean of one coordinate over a left/right joint pair, ignoring a missing side.
pub fn pair_mean(frame: &KeypointFrame, left: Joint, right: Joint, axis: Axis) -> Option<f64> {
    mean_present(&[frame[left].coord(axis), frame[right].coord(axis)])
}

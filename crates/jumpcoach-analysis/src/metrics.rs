//! Biomechanical metrics at the detected events.
//!
//! Angles are measured in the image plane from smoothed keypoints. Any
//! metric whose joints are missing at the relevant frame is reported as
//! `None` rather than failing the run.

use jumpcoach_models::{
    AngleMetrics, EventSet, FrameRate, Joint, KeypointFrame, KeypointSequence, MetricsReport,
    TimingMetrics,
};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::geometry::{joint_angle, knee_angle, mean_position, peak_bilateral};
use crate::signal::find_peaks;

/// Added to the last step length so a zero-length step cannot divide by zero.
const STEP_RATIO_EPSILON: f64 = 1e-6;

/// Computes angle and timing metrics for one jump.
#[derive(Debug, Clone)]
pub struct MetricsComputer {
    step_peak_spacing_secs: f64,
}

impl MetricsComputer {
    /// Create a metrics computer from the analysis configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            step_peak_spacing_secs: config.step_peak_spacing_secs,
        }
    }

    /// Compute all metrics for a smoothed sequence and its events.
    pub fn compute(
        &self,
        keypoints: &KeypointSequence,
        events: &EventSet,
        fps: FrameRate,
    ) -> MetricsReport {
        let at_plant = keypoints.frame(events.plant);
        let at_max_cm = keypoints.frame(events.max_cm);
        let at_takeoff = keypoints.frame(events.takeoff);

        let angles = AngleMetrics {
            arm_cock_peak_deg: at_takeoff.and_then(arm_cock_angle),
            elbow_extension_peak_deg: at_takeoff.and_then(elbow_extension_angle),
            torso_lean_deg: at_plant.and_then(torso_lean),
            knee_flex_deg: at_max_cm.and_then(knee_angle),
        };

        let min_spacing = fps.frames_in(self.step_peak_spacing_secs).max(1);
        let frames = keypoints.frames();
        let separation = ankle_separation(&frames[..events.plant.min(frames.len())]);
        let penultimate_last_ratio = step_length_ratio(&separation, min_spacing);
        if penultimate_last_ratio.is_none() {
            debug!(
                frames = events.plant,
                "Step ratio unavailable; fewer than two approach steps found"
            );
        }

        let timing = TimingMetrics {
            penultimate_last_ratio,
            jump_time_s: fps.seconds(events.apex.saturating_sub(events.takeoff)),
            time_to_contact_s: fps.seconds(events.apex.saturating_sub(events.plant)),
        };

        MetricsReport { angles, timing }
    }
}

impl Default for MetricsComputer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// Absolute angle between the hip-to-shoulder vector and the image y axis.
pub fn torso_lean(frame: &KeypointFrame) -> Option<f64> {
    let shoulders = mean_position(&[frame[Joint::LeftShoulder], frame[Joint::RightShoulder]])?;
    let hips = mean_position(&[frame[Joint::LeftHip], frame[Joint::RightHip]])?;
    let torso = shoulders.sub(hips);
    Some(torso.x.atan2(torso.y).to_degrees().abs())
}

/// Larger elbow-shoulder-hip angle of the two arms.
pub fn arm_cock_angle(frame: &KeypointFrame) -> Option<f64> {
    peak_bilateral(
        joint_angle(frame, Joint::LeftElbow, Joint::LeftShoulder, Joint::LeftHip),
        joint_angle(frame, Joint::RightElbow, Joint::RightShoulder, Joint::RightHip),
    )
}

/// Larger shoulder-elbow-wrist angle of the two arms.
pub fn elbow_extension_angle(frame: &KeypointFrame) -> Option<f64> {
    peak_bilateral(
        joint_angle(frame, Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
        joint_angle(frame, Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
    )
}

/// Horizontal distance between the ankles in each frame.
pub fn ankle_separation(frames: &[KeypointFrame]) -> Vec<Option<f64>> {
    frames
        .iter()
        .map(|f| Some((f[Joint::LeftAnkle].x? - f[Joint::RightAnkle].x?).abs()))
        .collect()
}

/// Ratio of the penultimate to the last approach step length.
///
/// Steps are the local maxima of the ankle separation at least
/// `min_spacing` frames apart. `None` when fewer than two steps are found.
pub fn step_length_ratio(separation: &[Option<f64>], min_spacing: usize) -> Option<f64> {
    let peaks = find_peaks(separation, min_spacing);
    let [.., penultimate, last] = peaks.as_slice() else {
        return None;
    };
    Some(separation[*penultimate]? / (separation[*last]? + STEP_RATIO_EPSILON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpcoach_models::Keypoint;

    fn kp(x: f64, y: f64) -> Keypoint {
        Keypoint::new(x, y, 1.0)
    }

    fn fps30() -> FrameRate {
        FrameRate::new(30.0).unwrap()
    }

    #[test]
    fn test_torso_lean_formula() {
        // Shoulders 10px right of the hips and 10px below them in image space.
        let frame = KeypointFrame::missing()
            .with(Joint::LeftShoulder, kp(110.0, 210.0))
            .with(Joint::RightShoulder, kp(130.0, 210.0))
            .with(Joint::LeftHip, kp(100.0, 200.0))
            .with(Joint::RightHip, kp(120.0, 200.0));
        assert!((torso_lean(&frame).unwrap() - 45.0).abs() < 1e-9);

        // Vector straight along +y has zero lean.
        let frame = frame
            .with(Joint::LeftShoulder, kp(100.0, 260.0))
            .with(Joint::RightShoulder, kp(120.0, 260.0));
        assert!(torso_lean(&frame).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_torso_lean_uses_available_side() {
        let frame = KeypointFrame::missing()
            .with(Joint::LeftShoulder, kp(100.0, 100.0))
            .with(Joint::LeftHip, kp(100.0, 200.0))
            .with(Joint::RightHip, kp(100.0, 200.0));
        assert!((torso_lean(&frame).unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(torso_lean(&KeypointFrame::missing()), None);
    }

    #[test]
    fn test_arm_angles_take_larger_side() {
        let frame = KeypointFrame::missing()
            // Left arm: elbow straight out sideways, wrist straight on.
            .with(Joint::LeftHip, kp(0.0, 100.0))
            .with(Joint::LeftShoulder, kp(0.0, 0.0))
            .with(Joint::LeftElbow, kp(50.0, 0.0))
            .with(Joint::LeftWrist, kp(100.0, 0.0))
            // Right arm: elbow overhead, forearm bent 90°.
            .with(Joint::RightHip, kp(200.0, 100.0))
            .with(Joint::RightShoulder, kp(200.0, 0.0))
            .with(Joint::RightElbow, kp(200.0, -50.0))
            .with(Joint::RightWrist, kp(250.0, -50.0));

        assert!((arm_cock_angle(&frame).unwrap() - 180.0).abs() < 1e-9);
        assert!((elbow_extension_angle(&frame).unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(arm_cock_angle(&KeypointFrame::missing()), None);
    }

    #[test]
    fn test_step_ratio_two_peaks() {
        let separation: Vec<Option<f64>> = [0.0, 30.0, 0.0, 20.0, 0.0]
            .into_iter()
            .map(Some)
            .collect();
        let ratio = step_length_ratio(&separation, 1).unwrap();
        assert!((ratio - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_ratio_uses_last_two_peaks() {
        let separation: Vec<Option<f64>> = [0.0, 10.0, 0.0, 60.0, 0.0, 40.0, 0.0]
            .into_iter()
            .map(Some)
            .collect();
        let ratio = step_length_ratio(&separation, 1).unwrap();
        assert!((ratio - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_ratio_insufficient_peaks() {
        assert_eq!(step_length_ratio(&[], 1), None);
        assert_eq!(step_length_ratio(&[Some(1.0), Some(5.0), Some(1.0)], 1), None);
        assert_eq!(step_length_ratio(&[None, None, None, None, None], 1), None);
        // Two peaks closer than the minimum spacing collapse into one.
        let close: Vec<Option<f64>> = [0.0, 30.0, 0.0, 20.0, 0.0].into_iter().map(Some).collect();
        assert_eq!(step_length_ratio(&close, 3), None);
    }

    #[test]
    fn test_ankle_separation_is_horizontal() {
        let frames = [
            KeypointFrame::missing()
                .with(Joint::LeftAnkle, kp(100.0, 0.0))
                .with(Joint::RightAnkle, kp(130.0, 40.0)),
            KeypointFrame::missing().with(Joint::LeftAnkle, kp(100.0, 0.0)),
        ];
        assert_eq!(ankle_separation(&frames), vec![Some(30.0), None]);
    }

    #[test]
    fn test_timing_from_events() {
        let seq = KeypointSequence::new(vec![KeypointFrame::missing(); 30]).unwrap();
        let events = EventSet::new(6, 9, 15, 24);
        let report = MetricsComputer::default().compute(&seq, &events, fps30());

        assert!((report.timing.jump_time_s - 0.3).abs() < 1e-12);
        assert!((report.timing.time_to_contact_s - 0.6).abs() < 1e-12);
        assert_eq!(report.timing.penultimate_last_ratio, None);
        assert_eq!(report.angles, AngleMetrics::default());
    }

    #[test]
    fn test_events_past_the_end_yield_missing_metrics() {
        let seq = KeypointSequence::new(vec![KeypointFrame::missing(); 5]).unwrap();
        let report = MetricsComputer::default().compute(&seq, &EventSet::new(9, 9, 9, 9), fps30());
        assert_eq!(report.angles, AngleMetrics::default());
        assert_eq!(report.timing.penultimate_last_ratio, None);
        assert_eq!(report.timing.jump_time_s, 0.0);
    }

    #[test]
    fn test_step_ratio_only_counts_frames_before_plant() {
        let xs = [0.0, 30.0, 0.0, 20.0, 0.0, 50.0, 0.0, 0.0];
        let frames: Vec<KeypointFrame> = xs
            .iter()
            .map(|&d| {
                KeypointFrame::missing()
                    .with(Joint::LeftAnkle, kp(100.0, 300.0))
                    .with(Joint::RightAnkle, kp(100.0 + d, 300.0))
            })
            .collect();
        let seq = KeypointSequence::new(frames).unwrap();
        // 30 fps * 0.1 s = 3 frames spacing would merge peaks; use 10 fps.
        let fps = FrameRate::new(10.0).unwrap();

        let before_plant = MetricsComputer::default().compute(&seq, &EventSet::new(5, 5, 6, 7), fps);
        let ratio = before_plant.timing.penultimate_last_ratio.unwrap();
        assert!((ratio - 1.5).abs() < 1e-6);

        let whole = MetricsComputer::default().compute(&seq, &EventSet::new(7, 7, 7, 7), fps);
        let ratio = whole.timing.penultimate_last_ratio.unwrap();
        assert!((ratio - 0.4).abs() < 1e-6);
    }
}

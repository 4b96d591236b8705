//! Threshold rules mapping metrics to training drills.

use jumpcoach_models::{Drill, MetricsReport, Recommendation};
use tracing::debug;

use crate::config::AnalysisConfig;

/// Rule-based coaching recommendations.
///
/// Rules are evaluated independently in a fixed order. A metric that could
/// not be measured triggers its rule, so unmeasurable technique is flagged
/// for attention rather than silently passed.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    max_torso_lean_deg: f64,
    min_arm_cock_deg: f64,
    min_step_ratio: f64,
}

impl RecommendationEngine {
    /// Create an engine from the analysis configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_torso_lean_deg: config.max_torso_lean_deg,
            min_arm_cock_deg: config.min_arm_cock_deg,
            min_step_ratio: config.min_step_ratio,
        }
    }

    /// Drills triggered by a metrics report, in rule order.
    pub fn recommend(&self, metrics: &MetricsReport) -> Vec<Recommendation> {
        let angles = &metrics.angles;
        let rules = [
            (
                Drill::TorsoControl,
                angles
                    .torso_lean_deg
                    .map_or(true, |lean| lean > self.max_torso_lean_deg),
            ),
            (
                Drill::ArmCockMechanics,
                angles
                    .arm_cock_peak_deg
                    .map_or(true, |angle| angle < self.min_arm_cock_deg),
            ),
            (
                Drill::ApproachSteps,
                metrics
                    .timing
                    .penultimate_last_ratio
                    .map_or(true, |ratio| ratio < self.min_step_ratio),
            ),
        ];

        rules
            .into_iter()
            .filter(|(_, triggered)| *triggered)
            .map(|(drill, _)| {
                debug!(drill = %drill, "Recommendation triggered");
                Recommendation::from(drill)
            })
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpcoach_models::{AngleMetrics, TimingMetrics};

    fn metrics(torso: Option<f64>, arm_cock: Option<f64>, ratio: Option<f64>) -> MetricsReport {
        MetricsReport {
            angles: AngleMetrics {
                arm_cock_peak_deg: arm_cock,
                elbow_extension_peak_deg: Some(170.0),
                torso_lean_deg: torso,
                knee_flex_deg: None,
            },
            timing: TimingMetrics {
                penultimate_last_ratio: ratio,
                jump_time_s: 0.3,
                time_to_contact_s: 0.6,
            },
        }
    }

    fn drill_ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.drill_id.as_str()).collect()
    }

    #[test]
    fn test_all_rules_fail_in_order() {
        let recs = RecommendationEngine::default().recommend(&metrics(Some(25.0), Some(90.0), Some(0.8)));
        assert_eq!(
            drill_ids(&recs),
            vec!["Torso Control", "Arm Cock Mechanics", "Approach Steps"]
        );
        assert_eq!(recs[0].focus, "Reduce torso lean at plant");
        assert_eq!(recs[1].focus, "Increase external rotation pre-takeoff");
        assert_eq!(recs[2].focus, "Lengthen penultimate relative to last");
    }

    #[test]
    fn test_all_rules_pass() {
        let recs = RecommendationEngine::default().recommend(&metrics(Some(10.0), Some(150.0), Some(1.5)));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_missing_metrics_trigger() {
        let recs = RecommendationEngine::default().recommend(&metrics(None, None, None));
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_rules_are_independent() {
        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&metrics(Some(10.0), Some(100.0), Some(1.5)));
        assert_eq!(drill_ids(&recs), vec!["Arm Cock Mechanics"]);

        let recs = engine.recommend(&metrics(Some(30.0), Some(150.0), None));
        assert_eq!(drill_ids(&recs), vec!["Torso Control", "Approach Steps"]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let recs = RecommendationEngine::default().recommend(&metrics(Some(18.0), Some(115.0), Some(1.2)));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = AnalysisConfig {
            max_torso_lean_deg: 5.0,
            ..AnalysisConfig::default()
        };
        let recs = RecommendationEngine::new(&config).recommend(&metrics(Some(10.0), Some(150.0), Some(1.5)));
        assert_eq!(drill_ids(&recs), vec!["Torso Control"]);
    }
}

//! Coaching recommendation catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Drills the recommendation rules can prescribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Drill {
    TorsoControl,
    ArmCockMechanics,
    ApproachSteps,
}

impl Drill {
    /// Drill identifier shown to coaches.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TorsoControl => "Torso Control",
            Self::ArmCockMechanics => "Arm Cock Mechanics",
            Self::ApproachSteps => "Approach Steps",
        }
    }

    /// What the drill works on.
    pub fn focus(&self) -> &'static str {
        match self {
            Self::TorsoControl => "Reduce torso lean at plant",
            Self::ArmCockMechanics => "Increase external rotation pre-takeoff",
            Self::ApproachSteps => "Lengthen penultimate relative to last",
        }
    }
}

impl fmt::Display for Drill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single training recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Drill identifier (e.g. "Torso Control")
    pub drill_id: String,
    /// What the athlete should work on
    pub focus: String,
}

impl From<Drill> for Recommendation {
    fn from(drill: Drill) -> Self {
        Self {
            drill_id: drill.as_str().to_string(),
            focus: drill.focus().to_string(),
        }
    }
}

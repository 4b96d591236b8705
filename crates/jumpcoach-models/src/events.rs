//! Detected jump events.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame indices of the four key moments of a jump.
///
/// After detection the indices satisfy
/// `0 <= plant <= max_cm <= takeoff <= apex <= T - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub struct EventSet {
    /// Approach foot contacts the ground before the jump.
    pub plant: usize,
    /// Deepest knee flexion between plant and takeoff.
    pub max_cm: usize,
    /// Feet leave the ground.
    pub takeoff: usize,
    /// Peak body height.
    pub apex: usize,
}

impl EventSet {
    pub fn new(plant: usize, max_cm: usize, takeoff: usize, apex: usize) -> Self {
        Self {
            plant,
            max_cm,
            takeoff,
            apex,
        }
    }

    /// Enforce the event ordering for a sequence of `frame_count` frames.
    ///
    /// Takeoff anchors the ordering: plant may not follow it, max_cm is
    /// clamped between plant and takeoff, and apex may not precede it.
    /// Every index is then clipped into `[0, frame_count - 1]`.
    pub fn normalized(self, frame_count: usize) -> Self {
        let last = frame_count.saturating_sub(1);
        let plant = self.plant.min(self.takeoff);
        let max_cm = self.max_cm.clamp(plant, self.takeoff);
        let apex = self.apex.max(self.takeoff);

        Self {
            plant: plant.min(last),
            max_cm: max_cm.min(last),
            takeoff: self.takeoff.min(last),
            apex: apex.min(last),
        }
    }

    /// Whether the ordering invariant holds for a sequence of `frame_count` frames.
    pub fn is_ordered_within(&self, frame_count: usize) -> bool {
        frame_count > 0
            && self.plant <= self.max_cm
            && self.max_cm <= self.takeoff
            && self.takeoff <= self.apex
            && self.apex < frame_count
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gesture", inline)]
#[serde(default)]
/// Distances (in layout units) and velocities (units/s) that drive gesture
/// classification.
pub struct GestureOptions {
    /// Vertical travel after which the swipe direction locks.
    #[schemars(title = "Direction Lock", range(min = 5.0, max = 100.0))]
    pub lock_threshold: f32,
    /// Vertical travel after which the fast/slow decision is made.
    #[schemars(title = "Detection Distance", range(min = 1.0, max = 50.0))]
    pub detection_distance: f32,
    /// Release velocity that commits a swipe regardless of distance.
    #[schemars(title = "Base Velocity", range(min = 100.0, max = 3000.0))]
    pub base_velocity: f32,
    /// Multiple of `base_velocity` that marks a swipe as fast.
    #[schemars(title = "Fast Multiplier", range(min = 1.0, max = 6.0))]
    pub fast_velocity_multiplier: f32,
    /// Travel that commits a swipe on release.
    #[schemars(title = "Action Threshold", range(min = 50.0, max = 600.0))]
    pub action_threshold: f32,
    /// Travel past the action threshold over which the second progressive
    /// ramp plays out.
    #[schemars(skip)]
    pub ramp_span: f32,
}

impl GestureOptions {
    /// Vertical velocity at or above which a swipe is classified as fast.
    #[must_use]
    pub fn fast_velocity(&self) -> f32 {
        self.base_velocity * self.fast_velocity_multiplier
    }
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            lock_threshold: 30.0,
            detection_distance: 12.0,
            base_velocity: 500.0,
            fast_velocity_multiplier: 3.0,
            action_threshold: 200.0,
            ramp_span: 200.0,
        }
    }
}

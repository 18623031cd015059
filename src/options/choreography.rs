use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Choreography", inline)]
#[serde(default)]
/// Stage geometry and spring-back timing for choreographies.
pub struct ChoreographyOptions {
    /// Vertical distance that takes a card fully off-stage.
    #[schemars(title = "Off-stage Distance", range(min = 100.0, max = 4000.0))]
    pub offstage_distance: f32,
    /// Spring-back duration after a cancelled gesture, in milliseconds.
    #[schemars(title = "Cancel (ms)", range(min = 150, max = 200))]
    pub cancel_ms: u64,
}

impl Default for ChoreographyOptions {
    fn default() -> Self {
        Self {
            offstage_distance: 1000.0,
            cancel_ms: 180,
        }
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render Loop", inline)]
#[serde(default)]
/// Pacing of the background render loop.
pub struct RenderLoopOptions {
    /// Target ticks per second (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
}

impl Default for RenderLoopOptions {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

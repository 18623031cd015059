use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Idle visual treatment for one stack rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct IdleTarget {
    /// Uniform scale.
    pub scale: f32,
    /// Vertical offset (negative = stacked behind/above the front card).
    pub offset: f32,
    /// Opacity.
    pub opacity: f32,
}

impl IdleTarget {
    /// Treatment of the front card.
    pub const FRONT: IdleTarget = IdleTarget {
        scale: 1.0,
        offset: 0.0,
        opacity: 1.0,
    };

    /// Component-wise linear interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            offset: self.offset + (other.offset - self.offset) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stack", inline)]
#[serde(default)]
/// Rank treatment and cascade timing.
pub struct StackOptions {
    /// Duration of a rank transition in milliseconds.
    #[schemars(title = "Transition (ms)", range(min = 0, max = 2000))]
    pub transition_ms: u64,
    /// Delay before a card promoted to the front starts moving, in
    /// milliseconds.
    #[schemars(title = "Promotion Delay (ms)", range(min = 0, max = 1000))]
    pub promotion_delay_ms: u64,
    /// Number of ranks drawn by the renderer.
    #[schemars(title = "Visible Window", range(min = 1, max = 8))]
    pub visible_window: usize,
    /// Idle treatment per rank; the last entry applies to every deeper rank.
    #[schemars(skip)]
    pub rank_targets: Vec<IdleTarget>,
}

impl StackOptions {
    /// Idle treatment for `rank`.
    #[must_use]
    pub fn idle_target(&self, rank: usize) -> IdleTarget {
        self.rank_targets
            .get(rank)
            .or_else(|| self.rank_targets.last())
            .copied()
            .unwrap_or(IdleTarget::FRONT)
    }

    /// Rank transition duration.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Promotion-to-front start delay.
    #[must_use]
    pub fn promotion_delay(&self) -> Duration {
        Duration::from_millis(self.promotion_delay_ms)
    }
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            transition_ms: 350,
            promotion_delay_ms: 120,
            visible_window: 3,
            rank_targets: vec![
                IdleTarget::FRONT,
                IdleTarget {
                    scale: 0.96,
                    offset: -20.0,
                    opacity: 0.85,
                },
                IdleTarget {
                    scale: 0.92,
                    offset: -40.0,
                    opacity: 0.7,
                },
            ],
        }
    }
}

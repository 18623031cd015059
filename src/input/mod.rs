//! Input handling: event types, velocity estimation, and the input
//! processor that converts raw window events into deck commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into deck commands.
pub mod processor;
/// Sliding-window velocity estimate.
pub mod velocity;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
pub use velocity::VelocityTracker;

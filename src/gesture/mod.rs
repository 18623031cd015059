//! Gesture recognition: raw pointer motion to swipe classification.

mod classifier;
mod sample;

pub use classifier::{
    ExitPath, GestureClassifier, GestureFeedback, GestureOutcome,
    GestureSession, LockedDirection, SwipeMode,
};
pub use sample::GestureSample;

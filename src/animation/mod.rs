//! Timed multi-phase property animation.
//!
//! Choreographies, spring-backs and undo entries are all expressed as a
//! [`Timeline`] played by a [`TimelineRunner`] against one card's
//! [`VisualState`](crate::card::VisualState).

mod runner;
mod timeline;

pub use runner::{TimelineRunner, TimelineStep};
pub use timeline::{Marker, Signal, Timeline, Track};

//! Stack cascade: rank-derived idle treatment for every card behind the
//! front one.

mod cascade;

pub use cascade::{RankTransition, StackCascadeController};

pub use crate::options::IdleTarget;

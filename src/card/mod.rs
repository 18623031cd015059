//! Card identity, content references, and per-card animation state.
//!
//! A [`Card`] is one unit of the triage stack. Its continuous visual
//! properties live in [`VisualState`], and the component currently allowed to
//! write them is recorded in [`CardAnimationState::driver`].

mod action;
mod state;
mod visual;

use std::fmt;

pub use action::{ActionResult, CommitAction, HapticPulse};
pub use state::{CardAnimationState, CardPhase, ChoreographyKind, Driver};
pub use visual::{VisualProperty, VisualState};

/// Stable identity of a card within a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque reference to the content a card presents (entry id, photo key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentRef(String);

impl ContentRef {
    /// Wrap a content key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One unit of the triage stack.
///
/// A card without a content reference is inert: it can sit in the stack
/// but every command aimed at it is ignored with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Stable identity.
    pub id: CardId,
    /// What the card shows. `None` makes the card inert.
    pub content: Option<ContentRef>,
    /// Rank at admission (0 = front). The deck tracks the live rank; read
    /// it through [`TriageDeck::rank`](crate::deck::TriageDeck::rank).
    pub rank: usize,
}

impl Card {
    /// A card presenting `content` at the given rank.
    pub fn new(id: CardId, content: impl Into<String>, rank: usize) -> Self {
        Self {
            id,
            content: Some(ContentRef::new(content)),
            rank,
        }
    }

    /// A card with no content reference.
    #[must_use]
    pub fn without_content(id: CardId, rank: usize) -> Self {
        Self {
            id,
            content: None,
            rank,
        }
    }

    /// Whether the card carries a content reference.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

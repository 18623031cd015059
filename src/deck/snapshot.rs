use crate::card::{CardId, CardPhase, VisualState};

/// Per-card frame data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSnapshot {
    /// Card identity.
    pub id: CardId,
    /// Current rank, `None` once the card has cleared the stack.
    pub rank: Option<usize>,
    /// Lifecycle phase.
    pub phase: CardPhase,
    /// Visual properties to draw.
    pub visual: VisualState,
    /// Whether the renderer should draw the card at all.
    pub visible: bool,
}

/// Everything the renderer needs for one frame.
///
/// Cards are stored in draw order: deepest rank first, then the front card,
/// then cards that have left the stack and are still playing their exit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckSnapshot {
    /// Cards in draw order.
    pub cards: Vec<CardSnapshot>,
}

impl DeckSnapshot {
    /// Frame data for one card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardSnapshot> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// The card at rank 0.
    #[must_use]
    pub fn front(&self) -> Option<&CardSnapshot> {
        self.cards.iter().find(|c| c.rank == Some(0))
    }

    /// Cards the renderer should draw, in draw order.
    pub fn visible(&self) -> impl Iterator<Item = &CardSnapshot> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub(crate) fn sort_for_drawing(&mut self) {
        self.cards.sort_by(|a, b| {
            draw_key(b.rank)
                .cmp(&draw_key(a.rank))
                .then(a.id.cmp(&b.id))
        });
    }
}

/// Larger keys are drawn first.
fn draw_key(rank: Option<usize>) -> (bool, usize) {
    match rank {
        Some(rank) => (true, rank),
        None => (false, 0),
    }
}

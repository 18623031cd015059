use crate::card::{ActionResult, CardId, CommitAction};

/// Discrete event crossing from the render context to the control context.
///
/// These are the only values that cross; continuous visual state stays on
/// the render side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// A gesture crossed the action threshold (once per session).
    ThresholdReached {
        /// The front card.
        card: CardId,
    },
    /// A gesture was released and classified.
    GestureEnded {
        /// The front card.
        card: CardId,
        /// Classification of the release.
        result: ActionResult,
    },
    /// An exiting card has cleared enough space for the cascade.
    ExitClearance {
        /// The exiting card.
        card: CardId,
        /// The action it is exiting through.
        action: CommitAction,
    },
    /// A delete dissolve has visually settled.
    DissolveVisualComplete {
        /// The dissolved card.
        card: CardId,
    },
    /// A committed choreography finished; the owner may now commit.
    ChoreographyComplete {
        /// The exited card.
        card: CardId,
        /// The action to commit.
        action: CommitAction,
    },
}

impl ControlEvent {
    /// The card the event concerns.
    #[must_use]
    pub fn card(&self) -> CardId {
        match *self {
            Self::ThresholdReached { card }
            | Self::GestureEnded { card, .. }
            | Self::ExitClearance { card, .. }
            | Self::DissolveVisualComplete { card }
            | Self::ChoreographyComplete { card, .. } => card,
        }
    }
}

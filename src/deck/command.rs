//! The deck's complete command vocabulary.
//!
//! Every operation on the stack, whether it comes from a pointer gesture, a
//! key press, a button, or the control context finishing a commit, is a
//! `DeckCommand`. Commands are applied with
//! [`TriageDeck::execute`](super::TriageDeck::execute) or sent through a
//! [`DeckHandle`] to be applied on the next tick.

use std::sync::mpsc;

use crate::card::{Card, CardId, CommitAction};
use crate::error::TriageError;
use crate::gesture::GestureSample;

/// One operation on the deck.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckCommand {
    /// Add a card at its initial rank.
    Admit(Card),
    /// Drop a card from the deck entirely.
    Remove(CardId),
    /// Undo: put a previously committed card back at the front.
    Restore {
        /// The card to bring back.
        card: Card,
        /// The action it exited through.
        prior: CommitAction,
    },
    /// Move a card to a new rank.
    SetRank {
        /// Target card.
        card: CardId,
        /// New rank (0 = front).
        rank: usize,
    },
    /// Mark a card as having just entered the visible window.
    SetNewlyVisible {
        /// Target card.
        card: CardId,
        /// Whether it is newly visible.
        visible: bool,
    },
    /// Pointer pressed on the front card.
    GestureStart,
    /// Pointer moved while pressed.
    GestureUpdate(GestureSample),
    /// Pointer released.
    GestureEnd(GestureSample),
    /// Commit an action without a gesture.
    Trigger {
        /// Target card, or the front card when `None`.
        card: Option<CardId>,
        /// Action to play.
        action: CommitAction,
    },
}

impl DeckCommand {
    /// Trigger `action` on the front card.
    #[must_use]
    pub fn trigger(action: CommitAction) -> Self {
        Self::Trigger { card: None, action }
    }
}

/// Cloneable sender for commands applied on the deck's next tick.
#[derive(Debug, Clone)]
pub struct DeckHandle {
    tx: mpsc::Sender<DeckCommand>,
}

impl DeckHandle {
    pub(crate) fn new(tx: mpsc::Sender<DeckCommand>) -> Self {
        Self { tx }
    }

    /// Queue a command.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DeckClosed`] if the deck has been dropped.
    pub fn send(&self, command: DeckCommand) -> Result<(), TriageError> {
        self.tx.send(command).map_err(|_| TriageError::DeckClosed)
    }

    /// Queue a trigger for the front card.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DeckClosed`] if the deck has been dropped.
    pub fn trigger(&self, action: CommitAction) -> Result<(), TriageError> {
        self.send(DeckCommand::trigger(action))
    }
}

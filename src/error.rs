//! Crate-level error types.

use std::fmt;

use crate::card::CardId;

/// Errors produced by the triage-deck crate.
#[derive(Debug)]
pub enum TriageError {
    /// No card with this id is admitted to the deck.
    UnknownCard(CardId),
    /// A card with this id is already admitted to the deck.
    DuplicateCard(CardId),
    /// A visible rank is already held by another card.
    RankOccupied {
        /// The requested rank.
        rank: usize,
        /// The card currently holding it.
        holder: CardId,
    },
    /// The deck's command channel is closed (render loop shut down).
    DeckClosed,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for TriageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCard(id) => write!(f, "unknown card {id}"),
            Self::DuplicateCard(id) => {
                write!(f, "card {id} is already in the deck")
            }
            Self::RankOccupied { rank, holder } => {
                write!(f, "rank {rank} is already held by card {holder}")
            }
            Self::DeckClosed => write!(f, "deck command channel is closed"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for TriageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TriageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An action that, once its choreography completes, is committed by the
/// owner.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CommitAction {
    /// File the card away ("boxing up").
    Archive,
    /// Move the card into the journal ("pickup and fly").
    Journal,
    /// Discard the card ("dissolve").
    Delete,
}

impl CommitAction {
    /// Haptic pulse played when the commit fires.
    #[must_use]
    pub fn haptic(self) -> HapticPulse {
        match self {
            Self::Archive => HapticPulse::Heavy,
            Self::Journal => HapticPulse::Medium,
            Self::Delete => HapticPulse::Warning,
        }
    }

    /// Short lowercase label for logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Journal => "journal",
            Self::Delete => "delete",
        }
    }
}

/// Terminal classification of a gesture or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionResult {
    /// Downward swipe past threshold.
    Archive,
    /// Upward swipe past threshold.
    Journal,
    /// Command-only; gestures never produce it.
    Delete,
    /// Released below every threshold; the card springs back.
    Cancel,
}

impl From<CommitAction> for ActionResult {
    fn from(action: CommitAction) -> Self {
        match action {
            CommitAction::Archive => Self::Archive,
            CommitAction::Journal => Self::Journal,
            CommitAction::Delete => Self::Delete,
        }
    }
}

/// Discrete haptic pulse severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticPulse {
    /// Threshold crossings.
    Light,
    /// Standard commit confirmation.
    Medium,
    /// Weighty commit confirmation.
    Heavy,
    /// Destructive commit confirmation.
    Warning,
}

use super::action::CommitAction;
use super::visual::VisualState;
use crate::choreography::ChoreographyRun;
use crate::gesture::GestureClassifier;
use crate::stack::RankTransition;

/// What a choreography run is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreographyKind {
    /// A committed exit for the given action.
    Commit(CommitAction),
    /// Spring-back after a gesture released below every threshold.
    Cancel,
    /// Undo: the time-reverse of the given action's exit.
    Entry(CommitAction),
}

/// The single component allowed to write a card's [`VisualState`].
///
/// Holding the writer's state inside the variant makes exclusivity
/// structural: switching driver drops the previous writer.
#[derive(Debug)]
pub enum Driver {
    /// Rank-derived idle treatment, optionally mid-transition.
    Cascade(Option<RankTransition>),
    /// A live gesture session.
    Gesture(GestureClassifier),
    /// A timed choreography (commit, cancel, or entry).
    Choreography(ChoreographyRun),
}

/// Coarse lifecycle phase of a card, derived from its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// At its rank's idle treatment.
    Idle,
    /// Animating toward a new rank's idle treatment.
    Transitioning,
    /// Following a gesture.
    Gesturing,
    /// Springing back after a cancelled gesture.
    Cancelling,
    /// Playing the archive choreography.
    Archiving,
    /// Playing the journal choreography.
    Journaling,
    /// Playing the delete choreography.
    Deleting,
    /// Choreography finished; waiting for the owner to remove it.
    Removed,
    /// Playing an undo entry.
    Restoring,
}

/// Per-card mutable bag of visual properties and discrete flags.
#[derive(Debug)]
pub struct CardAnimationState {
    /// Current visual properties, read by the renderer every frame.
    pub visual: VisualState,
    /// The component currently writing `visual`.
    pub driver: Driver,
    /// One-shot: the tail fade-in has been played for this card instance.
    has_faded_in: bool,
}

impl CardAnimationState {
    /// Settled state showing `visual`, driven by the cascade.
    #[must_use]
    pub fn settled(visual: VisualState) -> Self {
        Self {
            visual,
            driver: Driver::Cascade(None),
            has_faded_in: false,
        }
    }

    /// Coarse lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> CardPhase {
        match &self.driver {
            Driver::Cascade(None) => CardPhase::Idle,
            Driver::Cascade(Some(_)) => CardPhase::Transitioning,
            Driver::Gesture(_) => CardPhase::Gesturing,
            Driver::Choreography(run) => match run.kind() {
                ChoreographyKind::Cancel => CardPhase::Cancelling,
                ChoreographyKind::Entry(_) => CardPhase::Restoring,
                ChoreographyKind::Commit(_) if run.is_finished() => {
                    CardPhase::Removed
                }
                ChoreographyKind::Commit(CommitAction::Archive) => {
                    CardPhase::Archiving
                }
                ChoreographyKind::Commit(CommitAction::Journal) => {
                    CardPhase::Journaling
                }
                ChoreographyKind::Commit(CommitAction::Delete) => {
                    CardPhase::Deleting
                }
            },
        }
    }

    /// Whether a committed or entry choreography owns the card.
    ///
    /// While true, every trigger is ignored.
    #[must_use]
    pub fn action_in_progress(&self) -> bool {
        matches!(
            &self.driver,
            Driver::Choreography(run)
                if !matches!(run.kind(), ChoreographyKind::Cancel)
        )
    }

    /// Whether a gesture session owns the card.
    #[must_use]
    pub fn gesture_active(&self) -> bool {
        matches!(self.driver, Driver::Gesture(_))
    }

    /// Whether the cascade owns the card with no transition in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.driver, Driver::Cascade(None))
    }

    /// Whether the cascade owns the card (settled or transitioning).
    #[must_use]
    pub fn is_cascade_driven(&self) -> bool {
        matches!(self.driver, Driver::Cascade(_))
    }

    /// Consume the one-shot fade-in flag. Returns `true` only the first time.
    pub(crate) fn take_fade_in(&mut self) -> bool {
        if self.has_faded_in {
            return false;
        }
        self.has_faded_in = true;
        true
    }

    /// Whether the tail fade-in has already been played.
    #[must_use]
    pub fn has_faded_in(&self) -> bool {
        self.has_faded_in
    }
}

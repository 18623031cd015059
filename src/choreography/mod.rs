//! Committed multi-phase choreographies and their undo entries.
//!
//! [`ActionChoreographer`] starts and advances the archive, journal and
//! delete exits plus the cancel spring-back. Each exit raises
//! exit-clearance partway through (the cascade's cue to promote the next
//! card) and completion at its end (the owner's cue to commit).
//! [`EntryAnimator`] plays the reverse for undo.

mod entry;
pub mod presets;

pub use entry::EntryAnimator;
use web_time::Instant;

use crate::animation::{Signal, Timeline, TimelineRunner};
use crate::card::{
    CardAnimationState, ChoreographyKind, CommitAction, Driver, VisualState,
};
use crate::gesture::ExitPath;
use crate::options::ChoreographyOptions;

/// A timeline being played as a card's driver.
#[derive(Debug)]
pub struct ChoreographyRun {
    kind: ChoreographyKind,
    runner: TimelineRunner,
}

impl ChoreographyRun {
    /// Start playing `timeline` for `kind` at `now`.
    #[must_use]
    pub fn new(
        kind: ChoreographyKind,
        timeline: Timeline,
        now: Instant,
    ) -> Self {
        Self {
            kind,
            runner: TimelineRunner::new(timeline, now),
        }
    }

    /// What is being played.
    #[must_use]
    pub fn kind(&self) -> ChoreographyKind {
        self.kind
    }

    /// Whether completion has been reported.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.runner.is_complete()
    }

    /// The underlying runner.
    #[must_use]
    pub fn runner(&self) -> &TimelineRunner {
        &self.runner
    }

    /// Normalized progress at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        self.runner.progress(now)
    }
}

/// Lifecycle event raised while advancing a choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreographyEvent {
    /// The next card may start moving up.
    ExitClearance,
    /// The dissolve has visually settled.
    DissolveVisualComplete,
    /// The run reached its end.
    Completed(ChoreographyKind),
}

impl From<Signal> for ChoreographyEvent {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::ExitClearance => Self::ExitClearance,
            Signal::DissolveVisualComplete => Self::DissolveVisualComplete,
        }
    }
}

/// Starts and advances committed choreographies and spring-backs.
#[derive(Debug, Clone)]
pub struct ActionChoreographer {
    options: ChoreographyOptions,
}

impl ActionChoreographer {
    /// Choreographer for the given stage geometry.
    #[must_use]
    pub fn new(options: ChoreographyOptions) -> Self {
        Self { options }
    }

    /// Canonical timeline for `action`.
    #[must_use]
    pub fn timeline(&self, action: CommitAction) -> Timeline {
        match action {
            CommitAction::Archive => presets::archive(&self.options),
            CommitAction::Journal => presets::journal(&self.options),
            CommitAction::Delete => presets::delete(),
        }
    }

    /// Hand `state` to the choreography for `action`.
    ///
    /// Returns `false` (and changes nothing) while another committed or
    /// entry choreography owns the card. On the canonical path the visual
    /// state is reset to rest first; a continuation plays on from whatever
    /// the gesture left behind.
    pub fn commit(
        &self,
        state: &mut CardAnimationState,
        action: CommitAction,
        path: ExitPath,
        now: Instant,
    ) -> bool {
        if state.action_in_progress() {
            log::debug!("{} ignored: choreography in progress", action.label());
            return false;
        }
        if path == ExitPath::Canonical {
            state.visual = VisualState::REST;
        }
        state.driver = Driver::Choreography(ChoreographyRun::new(
            ChoreographyKind::Commit(action),
            self.timeline(action),
            now,
        ));
        log::debug!("{} choreography started ({path:?})", action.label());
        true
    }

    /// Spring `state` back to `rest`.
    pub fn cancel(
        &self,
        state: &mut CardAnimationState,
        rest: &VisualState,
        now: Instant,
    ) {
        let timeline = presets::cancel(&state.visual, rest, &self.options);
        state.driver = Driver::Choreography(ChoreographyRun::new(
            ChoreographyKind::Cancel,
            timeline,
            now,
        ));
    }

    /// Advance the card's choreography to `now`.
    ///
    /// Cancel and entry runs hand the card back to the cascade when they
    /// finish. A finished commit stays on its last frame until the owner
    /// removes the card.
    pub fn advance(
        &self,
        state: &mut CardAnimationState,
        now: Instant,
    ) -> Vec<ChoreographyEvent> {
        let Driver::Choreography(run) = &mut state.driver else {
            return Vec::new();
        };
        if run.is_finished() {
            return Vec::new();
        }

        let step = run.runner.advance(&mut state.visual, now);
        let mut events: Vec<ChoreographyEvent> =
            step.signals.into_iter().map(ChoreographyEvent::from).collect();

        if step.completed {
            let kind = run.kind;
            events.push(ChoreographyEvent::Completed(kind));
            if !matches!(kind, ChoreographyKind::Commit(_)) {
                state.driver = Driver::Cascade(None);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::card::CardPhase;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn choreographer() -> ActionChoreographer {
        ActionChoreographer::new(ChoreographyOptions::default())
    }

    #[test]
    fn archive_raises_clearance_then_completion() {
        let c = choreographer();
        let start = Instant::now();
        let mut state = CardAnimationState::settled(VisualState::REST);
        assert!(c.commit(
            &mut state,
            CommitAction::Archive,
            ExitPath::Canonical,
            start
        ));
        assert_eq!(state.phase(), CardPhase::Archiving);

        assert!(c.advance(&mut state, start + ms(540)).is_empty());
        assert_eq!(
            c.advance(&mut state, start + ms(550)),
            vec![ChoreographyEvent::ExitClearance]
        );
        assert!(c.advance(&mut state, start + ms(870)).is_empty());
        assert!(matches!(
            &state.driver,
            Driver::Choreography(run) if !run.is_finished()
        ));
        assert_eq!(
            c.advance(&mut state, start + ms(880)),
            vec![ChoreographyEvent::Completed(ChoreographyKind::Commit(
                CommitAction::Archive
            ))]
        );
        assert_eq!(state.phase(), CardPhase::Removed);
        assert!(matches!(
            &state.driver,
            Driver::Choreography(run)
                if run.is_finished() && run.runner().is_complete()
        ));
        assert!(state.visual.position.y >= 999.0);
        assert!(c.advance(&mut state, start + ms(2000)).is_empty());
    }

    #[test]
    fn reentrant_commit_is_ignored() {
        let c = choreographer();
        let start = Instant::now();
        let mut state = CardAnimationState::settled(VisualState::REST);
        assert!(c.commit(
            &mut state,
            CommitAction::Journal,
            ExitPath::Canonical,
            start
        ));
        let _ = c.advance(&mut state, start + ms(100));
        let before = state.visual;
        assert!(!c.commit(
            &mut state,
            CommitAction::Delete,
            ExitPath::Canonical,
            start + ms(100)
        ));
        assert_eq!(state.phase(), CardPhase::Journaling);
        assert_eq!(state.visual, before);
    }

    #[test]
    fn canonical_path_resets_progressed_values() {
        let c = choreographer();
        let start = Instant::now();
        let mut state = CardAnimationState::settled(VisualState {
            scale_x: 0.4,
            glow_opacity: 0.5,
            ..VisualState::REST
        });
        assert!(c.commit(
            &mut state,
            CommitAction::Journal,
            ExitPath::Canonical,
            start
        ));
        assert_eq!(state.visual.scale_x, 1.0);
        assert_eq!(state.visual.scale, 1.0);
        let _ = c.advance(&mut state, start);
        assert_eq!(state.visual.scale, 1.0);
    }

    #[test]
    fn continuation_plays_on_from_progressed_values() {
        let c = choreographer();
        let start = Instant::now();
        let progressed = VisualState {
            position: glam::Vec2::new(0.0, -208.0),
            scale_x: 0.6,
            ..VisualState::REST
        };
        let mut state = CardAnimationState::settled(progressed);
        assert!(c.commit(
            &mut state,
            CommitAction::Journal,
            ExitPath::Continuation,
            start
        ));
        let _ = c.advance(&mut state, start + ms(1));
        assert!(state.visual.scale_x < 0.61);
        assert!((state.visual.position.y + 208.0).abs() < 1e-3);
    }

    #[test]
    fn delete_dissolve_is_monotonic() {
        let c = choreographer();
        let start = Instant::now();
        let mut state = CardAnimationState::settled(VisualState::REST);
        assert!(c.commit(
            &mut state,
            CommitAction::Delete,
            ExitPath::Canonical,
            start
        ));
        let mut last = 0.0;
        let mut completed_at = None;
        for t in (0..=1200).step_by(16) {
            let events = c.advance(&mut state, start + ms(t));
            assert!(state.visual.dissolve_progress >= last);
            last = state.visual.dissolve_progress;
            if events
                .iter()
                .any(|e| matches!(e, ChoreographyEvent::Completed(_)))
            {
                completed_at = Some(t);
                assert!((state.visual.dissolve_progress - 1.0).abs() < 1e-5);
            }
        }
        assert!(completed_at.is_some_and(|t| t >= 1100));
    }

    #[test]
    fn cancel_returns_card_to_cascade() {
        let c = choreographer();
        let start = Instant::now();
        let mut state = CardAnimationState::settled(VisualState {
            position: glam::Vec2::new(0.0, -120.0),
            scale: 1.05,
            glow_opacity: 0.1,
            ..VisualState::REST
        });
        c.cancel(&mut state, &VisualState::REST, start);
        assert_eq!(state.phase(), CardPhase::Cancelling);
        assert!(!state.action_in_progress());

        let events = c.advance(&mut state, start + ms(180));
        assert_eq!(
            events,
            vec![ChoreographyEvent::Completed(ChoreographyKind::Cancel)]
        );
        assert!(state.is_settled());
        assert!(state.visual.approx_eq(&VisualState::REST, 1e-4));
    }
}

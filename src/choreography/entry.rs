//! Undo entries: the time-reverse of a committed exit.

use glam::Vec2;
use web_time::Instant;

use super::presets::{
    ARCHIVE_CRUSHED_SCALE_X, DELETE_UNDO_START_SCALE, ENTRY_OVERSHOOT_SCALE,
    JOURNAL_THIN_SCALE_X,
};
use super::ChoreographyRun;
use crate::animation::{Timeline, Track};
use crate::card::{
    CardAnimationState, ChoreographyKind, CommitAction, Driver, VisualProperty,
    VisualState,
};
use crate::options::ChoreographyOptions;
use crate::util::easing::EasingFunction;

/// Plays a restored card back onto the stage from where its exit left it.
///
/// Journal and archive entries mirror their exits; a delete entry only pops
/// the card back in, since dissolved fragments are never kept.
#[derive(Debug, Clone)]
pub struct EntryAnimator {
    options: ChoreographyOptions,
}

impl EntryAnimator {
    /// Animator for the given stage geometry.
    #[must_use]
    pub fn new(options: ChoreographyOptions) -> Self {
        Self { options }
    }

    /// Where the entry starts: the final frame of `prior`'s exit.
    #[must_use]
    pub fn initial_state(&self, prior: CommitAction) -> VisualState {
        let offstage = self.options.offstage_distance;
        match prior {
            CommitAction::Journal => VisualState {
                position: Vec2::new(0.0, -offstage),
                scale_x: JOURNAL_THIN_SCALE_X,
                ..VisualState::REST
            },
            CommitAction::Archive => VisualState {
                position: Vec2::new(0.0, offstage),
                scale_x: ARCHIVE_CRUSHED_SCALE_X,
                crush_progress: 1.0,
                stamp_opacity: 1.0,
                ..VisualState::REST
            },
            CommitAction::Delete => VisualState {
                scale: DELETE_UNDO_START_SCALE,
                opacity: 0.0,
                ..VisualState::REST
            },
        }
    }

    /// Entry timeline for a card that exited via `prior`.
    #[must_use]
    pub fn timeline(&self, prior: CommitAction) -> Timeline {
        match prior {
            CommitAction::Journal => with_overshoot(
                Timeline::new("journal-undo")
                    .track(
                        Track::new(VisualProperty::TranslateY, 0, 400, 0.0)
                            .eased(EasingFunction::CubicOut),
                    )
                    .track(
                        Track::new(VisualProperty::ScaleX, 0, 400, 1.0)
                            .eased(EasingFunction::CubicOut),
                    ),
            ),
            // Archive exit reversed over its own 880ms: rise, drop the
            // stamp, restore width, then height.
            CommitAction::Archive => Timeline::new("archive-undo")
                .track(
                    Track::new(VisualProperty::TranslateY, 0, 400, 0.0)
                        .eased(EasingFunction::QuadraticOut),
                )
                .track(
                    Track::new(VisualProperty::StampOpacity, 420, 80, 0.0)
                        .eased(EasingFunction::Linear),
                )
                .track(
                    Track::new(VisualProperty::ScaleX, 480, 200, 1.0)
                        .eased(EasingFunction::CubicOut),
                )
                .track(
                    Track::new(VisualProperty::CrushProgress, 630, 250, 0.0)
                        .eased(EasingFunction::CubicOut),
                ),
            CommitAction::Delete => with_overshoot(
                Timeline::new("delete-undo").track(
                    Track::new(VisualProperty::Opacity, 0, 200, 1.0)
                        .eased(EasingFunction::QuadraticOut),
                ),
            ),
        }
    }

    /// Hand `state` to an entry choreography starting at `now`.
    pub fn start(
        &self,
        state: &mut CardAnimationState,
        prior: CommitAction,
        now: Instant,
    ) {
        state.visual = self.initial_state(prior);
        state.driver = Driver::Choreography(ChoreographyRun::new(
            ChoreographyKind::Entry(prior),
            self.timeline(prior),
            now,
        ));
        log::debug!("entry started for prior {}", prior.label());
    }
}

/// Scale settles through a slight overshoot over 400ms.
fn with_overshoot(timeline: Timeline) -> Timeline {
    timeline
        .track(
            Track::new(VisualProperty::Scale, 0, 250, ENTRY_OVERSHOOT_SCALE)
                .eased(EasingFunction::QuadraticOut),
        )
        .track(
            Track::new(VisualProperty::Scale, 250, 150, 1.0)
                .eased(EasingFunction::CubicInOut),
        )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::TimelineRunner;

    fn play(prior: CommitAction, samples: &[u64]) -> Vec<VisualState> {
        let animator = EntryAnimator::new(ChoreographyOptions::default());
        let start = Instant::now();
        let mut visual = animator.initial_state(prior);
        let mut runner = TimelineRunner::new(animator.timeline(prior), start);
        samples
            .iter()
            .map(|&t| {
                let _ = runner.advance(
                    &mut visual,
                    start + Duration::from_millis(t),
                );
                visual
            })
            .collect()
    }

    #[test]
    fn journal_undo_descends_with_overshoot() {
        let frames = play(CommitAction::Journal, &[0, 250, 400]);
        assert!(frames[0].position.y < -900.0);
        assert!((frames[1].scale - ENTRY_OVERSHOOT_SCALE).abs() < 1e-4);
        assert!(frames[2].approx_eq(&VisualState::REST, 1e-3));
    }

    #[test]
    fn archive_undo_restores_width_before_height() {
        let frames = play(CommitAction::Archive, &[0, 400, 620, 700, 880]);
        assert!(frames[0].position.y > 900.0);
        assert!(frames[1].position.y.abs() < 1e-3);
        // Width mostly back, height still crushed.
        assert!(frames[2].scale_x > 0.9);
        assert!((frames[2].crush_progress - 1.0).abs() < 1e-4);
        assert!(frames[3].crush_progress < 1.0);
        assert!(frames[4].approx_eq(&VisualState::REST, 1e-3));
    }

    #[test]
    fn delete_undo_pops_without_dissolve() {
        let frames = play(CommitAction::Delete, &[0, 250, 400]);
        assert_eq!(frames[0].dissolve_progress, 0.0);
        assert_eq!(frames[0].scale, DELETE_UNDO_START_SCALE);
        assert!((frames[1].scale - ENTRY_OVERSHOOT_SCALE).abs() < 1e-4);
        assert!(frames[2].approx_eq(&VisualState::REST, 1e-3));
    }

    #[test]
    fn start_hands_card_to_entry_choreography() {
        let animator = EntryAnimator::new(ChoreographyOptions::default());
        let mut state = CardAnimationState::settled(VisualState::REST);
        animator.start(&mut state, CommitAction::Delete, Instant::now());
        assert!(state.action_in_progress());
        assert_eq!(state.visual.opacity, 0.0);
    }
}

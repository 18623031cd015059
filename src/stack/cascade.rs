//! Rank-driven idle treatment and rank-change transitions.
//!
//! Every card the cascade drives sits at (or animates toward) the idle
//! target of its rank. A rank change starts a [`RankTransition`]; promotion
//! to the front is held back by the promotion delay so the exiting card has
//! cleared the space first.

use std::time::Duration;

use web_time::Instant;

use crate::card::{CardAnimationState, Driver, VisualState};
use crate::options::{IdleTarget, StackOptions};
use crate::util::easing::EasingFunction;

/// An in-flight move toward a rank's idle target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankTransition {
    /// Rank being moved to.
    pub rank: usize,
    /// Idle treatment of that rank.
    pub target: IdleTarget,
    /// When the transition begins moving.
    pub start_at: Instant,
    /// Length of the move.
    pub duration: Duration,
    /// Curve applied to progress.
    pub easing: EasingFunction,
    /// Treatment captured when the move began, `None` while pending.
    from: Option<IdleTarget>,
}

impl RankTransition {
    /// Whether the transition is still waiting for its start instant.
    #[must_use]
    pub fn is_pending(&self, now: Instant) -> bool {
        now < self.start_at
    }

    /// Eased progress at `now` (0 before the start).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return if self.is_pending(now) { 0.0 } else { 1.0 };
        }
        let t = now.saturating_duration_since(self.start_at).as_secs_f32()
            / self.duration.as_secs_f32();
        self.easing.evaluate(t)
    }
}

/// Computes idle targets by rank and animates rank changes.
#[derive(Debug, Clone)]
pub struct StackCascadeController {
    options: StackOptions,
}

impl StackCascadeController {
    /// Controller with the given rank treatment.
    #[must_use]
    pub fn new(options: StackOptions) -> Self {
        Self { options }
    }

    /// Rank treatment in use.
    #[must_use]
    pub fn options(&self) -> &StackOptions {
        &self.options
    }

    /// Whether `rank` is drawn.
    #[must_use]
    pub fn is_visible(&self, rank: usize) -> bool {
        rank < self.options.visible_window
    }

    /// Full visual state of a settled card at `rank`.
    #[must_use]
    pub fn idle_visual(&self, rank: usize) -> VisualState {
        let target = self.options.idle_target(rank);
        let mut visual = VisualState::REST;
        apply(&mut visual, &target);
        visual
    }

    /// Start moving `state` from `from_rank` to `to_rank`.
    ///
    /// Returns `false` when nothing new was started: the card is already at
    /// or heading for `to_rank`, or a gesture or choreography owns it (the
    /// caller snaps it to its rank once that driver lets go).
    pub fn set_rank(
        &self,
        state: &mut CardAnimationState,
        from_rank: usize,
        to_rank: usize,
        now: Instant,
    ) -> bool {
        let current = match &state.driver {
            Driver::Cascade(Some(transition)) => transition.rank,
            Driver::Cascade(None) => from_rank,
            Driver::Gesture(_) | Driver::Choreography(_) => {
                log::debug!("rank {to_rank} recorded while card is busy");
                return false;
            }
        };
        if current == to_rank {
            return false;
        }

        let delay = if to_rank == 0 && current > 0 {
            self.options.promotion_delay()
        } else {
            Duration::ZERO
        };
        let transition = self.transition(to_rank, now + delay);
        state.driver = Driver::Cascade(Some(transition));
        log::debug!("rank {current} -> {to_rank} (delay {delay:?})");
        true
    }

    /// Play the one-shot tail fade-in for a card entering the visible
    /// window at `rank`.
    ///
    /// Returns `false` when the card has already faded in once, when
    /// `visible` is false, or when another driver owns the card.
    pub fn set_newly_visible(
        &self,
        state: &mut CardAnimationState,
        rank: usize,
        visible: bool,
        now: Instant,
    ) -> bool {
        if !visible || !state.is_cascade_driven() || !state.take_fade_in() {
            return false;
        }
        // Keep a pending start (promotion delay) if one is already queued.
        let start_at = match &state.driver {
            Driver::Cascade(Some(t)) if t.rank == rank => t.start_at.max(now),
            _ => now,
        };
        state.visual.opacity = 0.0;
        state.driver = Driver::Cascade(Some(self.transition(rank, start_at)));
        log::debug!("fade-in at rank {rank}");
        true
    }

    /// Advance a cascade-driven card. Returns `true` when a transition
    /// finished this frame.
    pub fn advance(
        &self,
        state: &mut CardAnimationState,
        now: Instant,
    ) -> bool {
        let Driver::Cascade(Some(transition)) = &mut state.driver else {
            return false;
        };
        if transition.is_pending(now) {
            return false;
        }

        let from = *transition.from.get_or_insert_with(|| IdleTarget {
            scale: state.visual.scale,
            offset: state.visual.position.y,
            opacity: state.visual.opacity,
        });
        let eased = transition.progress(now);
        apply(&mut state.visual, &from.lerp(&transition.target, eased));

        if now.saturating_duration_since(transition.start_at)
            >= transition.duration
        {
            apply(&mut state.visual, &transition.target);
            state.driver = Driver::Cascade(None);
            return true;
        }
        false
    }

    /// Drop any transition and place `state` exactly at `rank`'s treatment.
    pub fn snap_to_rank(&self, state: &mut CardAnimationState, rank: usize) {
        state.driver = Driver::Cascade(None);
        state.visual = self.idle_visual(rank);
    }

    fn transition(&self, rank: usize, start_at: Instant) -> RankTransition {
        RankTransition {
            rank,
            target: self.options.idle_target(rank),
            start_at,
            duration: self.options.transition(),
            easing: EasingFunction::DEFAULT,
            from: None,
        }
    }
}

fn apply(visual: &mut VisualState, target: &IdleTarget) {
    visual.scale = target.scale;
    visual.position.y = target.offset;
    visual.opacity = target.opacity;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn cascade() -> StackCascadeController {
        StackCascadeController::new(StackOptions::default())
    }

    fn settled_at(
        c: &StackCascadeController,
        rank: usize,
    ) -> CardAnimationState {
        CardAnimationState::settled(c.idle_visual(rank))
    }

    #[test]
    fn idle_visual_by_rank() {
        let c = cascade();
        assert_eq!(c.idle_visual(0), VisualState::REST);
        let back = c.idle_visual(2);
        assert_eq!(back.scale, 0.92);
        assert_eq!(back.position.y, -40.0);
        assert_eq!(back.opacity, 0.7);
        assert_eq!(c.idle_visual(5), back);
    }

    #[test]
    fn rank_change_animates_to_target() {
        let c = cascade();
        let start = Instant::now();
        let mut state = settled_at(&c, 2);
        assert!(c.set_rank(&mut state, 2, 1, start));

        assert!(!c.advance(&mut state, start + ms(100)));
        assert!(state.visual.scale > 0.92 && state.visual.scale < 0.96);

        assert!(c.advance(&mut state, start + ms(350)));
        assert!(state.is_settled());
        assert_eq!(state.visual, c.idle_visual(1));
    }

    #[test]
    fn setting_same_rank_twice_does_not_restart() {
        let c = cascade();
        let start = Instant::now();
        let mut state = settled_at(&c, 2);
        assert!(c.set_rank(&mut state, 2, 1, start));
        let _ = c.advance(&mut state, start + ms(200));
        let mid = state.visual;

        assert!(!c.set_rank(&mut state, 2, 1, start + ms(200)));
        let _ = c.advance(&mut state, start + ms(200));
        assert_eq!(state.visual, mid);
        assert!(c.advance(&mut state, start + ms(350)));

        // Settled at the rank already held.
        assert!(!c.set_rank(&mut state, 1, 1, start + ms(400)));
        assert!(state.is_settled());
    }

    #[test]
    fn promotion_to_front_waits_for_delay() {
        let c = cascade();
        let clearance = Instant::now();
        let mut state = settled_at(&c, 1);
        assert!(c.set_rank(&mut state, 1, 0, clearance));

        let _ = c.advance(&mut state, clearance + ms(119));
        assert_eq!(state.visual, c.idle_visual(1));
        assert!(!state.is_settled());

        let _ = c.advance(&mut state, clearance + ms(200));
        assert!(state.visual.scale > 0.96);

        assert!(c.advance(&mut state, clearance + ms(470)));
        assert_eq!(state.visual, VisualState::REST);
    }

    #[test]
    fn demotion_starts_immediately() {
        let c = cascade();
        let start = Instant::now();
        let mut state = settled_at(&c, 0);
        assert!(c.set_rank(&mut state, 0, 1, start));
        let _ = c.advance(&mut state, start + ms(50));
        assert!(state.visual.scale < 1.0);
    }

    #[test]
    fn fade_in_plays_once_per_card() {
        let c = cascade();
        let start = Instant::now();
        let mut state = settled_at(&c, 2);
        assert!(c.set_newly_visible(&mut state, 2, true, start));
        assert_eq!(state.visual.opacity, 0.0);
        assert!(c.advance(&mut state, start + ms(350)));
        assert_eq!(state.visual.opacity, 0.7);

        assert!(!c.set_newly_visible(&mut state, 2, true, start + ms(400)));
        assert_eq!(state.visual.opacity, 0.7);
        assert!(state.has_faded_in());
    }

    #[test]
    fn busy_card_ignores_rank_change() {
        let c = cascade();
        let mut state = settled_at(&c, 0);
        state.driver = Driver::Gesture(crate::gesture::GestureClassifier::start(
            crate::options::GestureOptions::default(),
            glam::Vec2::ZERO,
        ));
        assert!(!c.set_rank(&mut state, 0, 1, Instant::now()));
        assert!(state.gesture_active());

        c.snap_to_rank(&mut state, 1);
        assert!(state.is_settled());
        assert_eq!(state.visual, c.idle_visual(1));
    }
}

//! Swipe classification with progressive visual feedback.
//!
//! The classifier turns a stream of [`GestureSample`]s into:
//! - a locked vertical direction (first time |dy| passes the lock distance)
//! - a speed mode, decided once |dy| passes the detection distance
//! - progressive feedback written straight into the card's visual state
//! - a terminal [`GestureOutcome`] on release
//!
//! Fast/slow detection waits for a few units of travel because velocity
//! samples are noisy in the first frames of a drag.

use glam::Vec2;

use super::sample::GestureSample;
use crate::card::{ActionResult, CommitAction, VisualState};
use crate::choreography::presets::{
    ARCHIVE_CRUSHED_SCALE_X, ARCHIVE_PROGRESSIVE_CRUSH,
    ARCHIVE_PROGRESSIVE_STAMP, JOURNAL_GLOW_PEAK, JOURNAL_POP_SCALE,
    JOURNAL_PROGRESSIVE_GLOW, JOURNAL_THIN_SCALE_X,
};
use crate::options::GestureOptions;

/// Horizontal scale above which a journal swipe counts as not yet advanced.
const JOURNAL_ADVANCED_SCALE_X: f32 = 0.7;
/// Crush below which an archive swipe counts as not yet advanced.
const ARCHIVE_ADVANCED_CRUSH: f32 = 0.3;

/// Vertical direction locked for the rest of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockedDirection {
    /// Not yet locked.
    #[default]
    None,
    /// Toward the top of the stage (journal).
    Up,
    /// Toward the bottom of the stage (archive).
    Down,
}

/// Swipe-speed mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeMode {
    /// Too little travel to decide yet.
    #[default]
    Detecting,
    /// Progressive feedback follows the finger.
    Slow,
    /// Feedback suppressed until release.
    Fast,
}

/// State of one continuous pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Card position when the session began.
    pub start_offset: Vec2,
    /// Direction locked so far.
    pub locked_direction: LockedDirection,
    /// Speed mode decided so far.
    pub mode: SwipeMode,
    /// Vertical translation at the Detecting→Slow transition. Progressive
    /// effects are measured from here so they start at zero.
    pub visual_offset: f32,
}

/// How a committed swipe hands over to its choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPath {
    /// Reset to rest and replay the canonical choreography.
    Canonical,
    /// Finish from the progressed state without resetting.
    Continuation,
}

/// Terminal classification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released below every threshold.
    Cancel,
    /// Released past a distance or velocity threshold.
    Commit {
        /// Archive (down) or Journal (up).
        action: CommitAction,
        /// How the choreography takes over.
        path: ExitPath,
    },
}

impl GestureOutcome {
    /// The outcome as an [`ActionResult`].
    #[must_use]
    pub fn result(self) -> ActionResult {
        match self {
            Self::Cancel => ActionResult::Cancel,
            Self::Commit { action, .. } => action.into(),
        }
    }
}

/// Per-update feedback that must cross into the control context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureFeedback {
    /// The action threshold was crossed for the first time this session.
    pub threshold_reached: bool,
}

/// Classifies one gesture session.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    options: GestureOptions,
    session: GestureSession,
    threshold_notified: bool,
}

impl GestureClassifier {
    /// Begin a session for a card currently at `start_offset`.
    #[must_use]
    pub fn start(options: GestureOptions, start_offset: Vec2) -> Self {
        Self {
            options,
            session: GestureSession {
                start_offset,
                locked_direction: LockedDirection::None,
                mode: SwipeMode::Detecting,
                visual_offset: 0.0,
            },
            threshold_notified: false,
        }
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Feed one motion sample, writing progressive feedback into `visual`.
    pub fn update(
        &mut self,
        sample: GestureSample,
        visual: &mut VisualState,
    ) -> GestureFeedback {
        let sample = sample.sanitized();
        let dy = sample.translation.y;

        if self.session.locked_direction == LockedDirection::None
            && dy.abs() > self.options.lock_threshold
        {
            self.session.locked_direction = if dy < 0.0 {
                LockedDirection::Up
            } else {
                LockedDirection::Down
            };
            log::debug!("gesture locked {:?}", self.session.locked_direction);
        }

        if self.session.mode == SwipeMode::Detecting
            && dy.abs() >= self.options.detection_distance
        {
            if sample.velocity.y.abs() >= self.options.fast_velocity() {
                self.session.mode = SwipeMode::Fast;
            } else {
                self.session.mode = SwipeMode::Slow;
                self.session.visual_offset = dy;
            }
            log::debug!(
                "gesture mode {:?} at dy={dy:.1} vy={:.0}",
                self.session.mode,
                sample.velocity.y
            );
        }

        let feedback = GestureFeedback {
            threshold_reached: self.check_threshold(dy),
        };

        if self.session.mode == SwipeMode::Slow {
            self.apply_progressive(dy, visual);
        }

        feedback
    }

    /// Classify the release.
    ///
    /// `visual` is the card's state after the last update, used to decide
    /// whether the progressive ramps had advanced far enough to continue
    /// from rather than replay.
    #[must_use]
    pub fn end(
        &self,
        sample: GestureSample,
        visual: &VisualState,
    ) -> GestureOutcome {
        let sample = sample.sanitized();
        let dy = sample.translation.y;
        let vy = sample.velocity.y;
        let threshold = self.options.action_threshold;
        let velocity = self.options.base_velocity;
        let locked = self.session.locked_direction;

        let is_up = (locked == LockedDirection::Up && dy < -threshold)
            || (vy < -velocity && dy < 0.0);
        let is_down = (locked == LockedDirection::Down && dy > threshold)
            || (vy > velocity && dy > 0.0);

        let action = if is_up {
            CommitAction::Journal
        } else if is_down {
            CommitAction::Archive
        } else {
            return GestureOutcome::Cancel;
        };

        GestureOutcome::Commit {
            action,
            path: self.exit_path(action, dy, visual),
        }
    }

    /// Fast path when no progressive feedback was shown for `action`, or
    /// when velocity committed the swipe before the ramps had advanced.
    fn exit_path(
        &self,
        action: CommitAction,
        dy: f32,
        visual: &VisualState,
    ) -> ExitPath {
        let (direction, advanced) = match action {
            CommitAction::Journal => (
                LockedDirection::Up,
                visual.scale_x <= JOURNAL_ADVANCED_SCALE_X,
            ),
            CommitAction::Archive => (
                LockedDirection::Down,
                visual.crush_progress >= ARCHIVE_ADVANCED_CRUSH,
            ),
            CommitAction::Delete => return ExitPath::Canonical,
        };

        let shown = self.session.mode == SwipeMode::Slow
            && self.session.locked_direction == direction;
        if !shown {
            return ExitPath::Canonical;
        }

        let released_by_distance =
            travel(direction, dy) > self.options.action_threshold;
        if advanced || released_by_distance {
            ExitPath::Continuation
        } else {
            ExitPath::Canonical
        }
    }

    /// One-shot threshold notification, measured on raw translation along
    /// the locked direction.
    fn check_threshold(&mut self, dy: f32) -> bool {
        if self.threshold_notified {
            return false;
        }
        let distance = travel(self.session.locked_direction, dy);
        if distance >= self.options.action_threshold {
            self.threshold_notified = true;
            return true;
        }
        false
    }

    fn apply_progressive(&self, dy: f32, visual: &mut VisualState) {
        let adjusted = dy - self.session.visual_offset;
        let start = self.session.start_offset;

        match self.session.locked_direction {
            LockedDirection::None => {}
            LockedDirection::Down => {
                let (first, second) =
                    self.ramps(travel(LockedDirection::Down, adjusted));
                visual.position = start;
                visual.crush_progress = ARCHIVE_PROGRESSIVE_CRUSH * first
                    + (1.0 - ARCHIVE_PROGRESSIVE_CRUSH) * second;
                visual.scale_x =
                    1.0 - (1.0 - ARCHIVE_CRUSHED_SCALE_X) * second;
                visual.stamp_opacity = ARCHIVE_PROGRESSIVE_STAMP * second;
            }
            LockedDirection::Up => {
                let (first, second) =
                    self.ramps(travel(LockedDirection::Up, adjusted));
                let pop = JOURNAL_POP_SCALE - 1.0;
                visual.position = start + Vec2::new(0.0, adjusted);
                visual.scale = 1.0 + pop * first - pop * second;
                visual.scale_x = 1.0 - (1.0 - JOURNAL_THIN_SCALE_X) * second;
                visual.glow_opacity = JOURNAL_PROGRESSIVE_GLOW * first
                    + (JOURNAL_GLOW_PEAK - JOURNAL_PROGRESSIVE_GLOW) * second;
            }
        }
    }

    /// Progress of the pre-threshold and post-threshold ramps for a travel
    /// distance.
    fn ramps(&self, travel: f32) -> (f32, f32) {
        let threshold = self.options.action_threshold;
        let span = self.options.ramp_span;
        let first = if threshold > 0.0 {
            (travel / threshold).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let second = if span > 0.0 {
            ((travel - threshold) / span).clamp(0.0, 1.0)
        } else if travel >= threshold {
            1.0
        } else {
            0.0
        };
        (first, second)
    }
}

/// Non-negative distance travelled along `direction`.
fn travel(direction: LockedDirection, dy: f32) -> f32 {
    match direction {
        LockedDirection::None => 0.0,
        LockedDirection::Up => (-dy).max(0.0),
        LockedDirection::Down => dy.max(0.0),
    }
}

//! Timeline runner executes a single timeline against a card's visual state.

use std::time::Duration;

use web_time::Instant;

use super::timeline::{Signal, Timeline};
use crate::card::VisualState;

/// What happened during one [`TimelineRunner::advance`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineStep {
    /// Markers crossed this frame, in time order.
    pub signals: Vec<Signal>,
    /// Whether the timeline reached its end this frame.
    pub completed: bool,
}

/// Plays a [`Timeline`] from a fixed start instant.
///
/// The runner holds:
/// - The timeline (tracks and markers)
/// - Per-track start values, captured when each track first becomes active
/// - Marker and completion bookkeeping so every signal fires exactly once
pub struct TimelineRunner {
    /// When the timeline started.
    start_time: Instant,
    timeline: Timeline,
    total_duration: Duration,
    /// Start value per track, `None` until the track begins.
    captured: Vec<Option<f32>>,
    /// Index of the next marker to fire.
    next_marker: usize,
    complete: bool,
}

impl TimelineRunner {
    /// Start playing `timeline` at `start_time`.
    #[must_use]
    pub fn new(timeline: Timeline, start_time: Instant) -> Self {
        let total_duration = timeline.total_duration();
        let captured = vec![None; timeline.tracks().len()];
        Self {
            start_time,
            timeline,
            total_duration,
            captured,
            next_marker: 0,
            complete: false,
        }
    }

    /// The timeline being played.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Total duration of the timeline.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.total_duration
    }

    /// When the timeline started.
    #[must_use]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Time elapsed since the start, saturating at zero.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    /// Normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.total_duration.is_zero() {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f32() / self.total_duration.as_secs_f32())
            .min(1.0)
    }

    /// Whether the end of the timeline has been reported.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Evaluate every active track at `now`, writing into `visual`.
    ///
    /// Tracks are applied in start order, so when two tracks share a
    /// property the later one overwrites the earlier one's final value.
    /// After completion the runner stops writing.
    pub fn advance(
        &mut self,
        visual: &mut VisualState,
        now: Instant,
    ) -> TimelineStep {
        let mut step = TimelineStep::default();
        if self.complete {
            return step;
        }

        let elapsed = self.elapsed(now);

        for (track, captured) in
            self.timeline.tracks().iter().zip(self.captured.iter_mut())
        {
            if elapsed < track.start {
                break;
            }
            let from =
                *captured.get_or_insert_with(|| visual.get(track.property));
            let local_t = if track.duration.is_zero() {
                1.0
            } else {
                ((elapsed - track.start).as_secs_f32()
                    / track.duration.as_secs_f32())
                .min(1.0)
            };
            let eased = track.easing.evaluate(local_t);
            visual.set(track.property, from + (track.to - from) * eased);
        }

        let markers = self.timeline.markers();
        while let Some(marker) = markers.get(self.next_marker) {
            if marker.at > elapsed {
                break;
            }
            step.signals.push(marker.signal);
            self.next_marker += 1;
        }

        if elapsed >= self.total_duration {
            self.complete = true;
            step.completed = true;
        }

        step
    }
}

impl std::fmt::Debug for TimelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineRunner")
            .field("name", &self.timeline.name())
            .field("duration", &self.total_duration)
            .field("tracks", &self.timeline.tracks().len())
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::timeline::Track;
    use crate::card::VisualProperty;
    use crate::util::easing::EasingFunction;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn pop_timeline() -> Timeline {
        Timeline::new("pop")
            .track(
                Track::new(VisualProperty::Scale, 0, 100, 2.0)
                    .eased(EasingFunction::Linear),
            )
            .track(
                Track::new(VisualProperty::Scale, 100, 100, 1.0)
                    .eased(EasingFunction::Linear),
            )
            .marker(150, Signal::ExitClearance)
    }

    #[test]
    fn test_runner_progress() {
        let start = Instant::now();
        let runner = TimelineRunner::new(pop_timeline(), start);
        assert_eq!(runner.progress(start), 0.0);
        assert!((runner.progress(start + ms(100)) - 0.5).abs() < 0.01);
        assert_eq!(runner.progress(start + ms(500)), 1.0);
        assert_eq!(runner.duration(), ms(200));
    }

    #[test]
    fn test_sequential_tracks_hand_off() {
        let start = Instant::now();
        let mut runner = TimelineRunner::new(pop_timeline(), start);
        let mut visual = VisualState::REST;

        let _ = runner.advance(&mut visual, start + ms(50));
        assert!((visual.scale - 1.5).abs() < 1e-4);

        // Skipping over the boundary still lands the first track at its
        // target before the second one captures it.
        let _ = runner.advance(&mut visual, start + ms(150));
        assert!((visual.scale - 1.5).abs() < 1e-4);

        let step = runner.advance(&mut visual, start + ms(200));
        assert!(step.completed);
        assert!((visual.scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tracks_capture_current_value() {
        let start = Instant::now();
        let timeline = Timeline::new("fade").track(
            Track::new(VisualProperty::Opacity, 0, 100, 0.0)
                .eased(EasingFunction::Linear),
        );
        let mut runner = TimelineRunner::new(timeline, start);
        let mut visual = VisualState {
            opacity: 0.5,
            ..VisualState::REST
        };
        let _ = runner.advance(&mut visual, start + ms(50));
        assert!((visual.opacity - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_markers_fire_exactly_once() {
        let start = Instant::now();
        let mut runner = TimelineRunner::new(pop_timeline(), start);
        let mut visual = VisualState::REST;

        let step = runner.advance(&mut visual, start + ms(149));
        assert!(step.signals.is_empty());
        assert_eq!(
            runner.advance(&mut visual, start + ms(150)).signals,
            vec![Signal::ExitClearance]
        );
        let step = runner.advance(&mut visual, start + ms(160));
        assert!(step.signals.is_empty());
    }

    #[test]
    fn test_completion_reported_once_and_writes_stop() {
        let start = Instant::now();
        let mut runner = TimelineRunner::new(pop_timeline(), start);
        let mut visual = VisualState::REST;

        let step = runner.advance(&mut visual, start + ms(1000));
        assert!(step.completed);
        assert_eq!(step.signals, vec![Signal::ExitClearance]);
        assert!(runner.is_complete());

        visual.scale = 3.0;
        let step = runner.advance(&mut visual, start + ms(2000));
        assert!(!step.completed);
        assert_eq!(visual.scale, 3.0);
    }

    #[test]
    fn test_tracks_wait_for_their_start() {
        let start = Instant::now();
        let timeline = Timeline::new("late").track(
            Track::new(VisualProperty::TranslateY, 100, 100, -50.0)
                .eased(EasingFunction::Linear),
        );
        let mut runner = TimelineRunner::new(timeline, start);
        let mut visual = VisualState::REST;
        let _ = runner.advance(&mut visual, start + ms(99));
        assert_eq!(visual.position.y, 0.0);
        let _ = runner.advance(&mut visual, start + ms(150));
        assert!((visual.position.y + 25.0).abs() < 1e-3);
    }
}

//! Canonical timelines for every committed action and the cancel spring-back.
//!
//! Timings are fixed; only the off-stage distance and the spring-back
//! duration come from [`ChoreographyOptions`].

use crate::animation::{Signal, Timeline, Track};
use crate::card::{VisualProperty, VisualState};
use crate::options::ChoreographyOptions;
use crate::util::easing::EasingFunction;

/// Crush reached by the archive gesture at the action threshold.
pub const ARCHIVE_PROGRESSIVE_CRUSH: f32 = 0.6;
/// Horizontal scale of a fully boxed-up card.
pub const ARCHIVE_CRUSHED_SCALE_X: f32 = 0.2;
/// Stamp opacity reached by the archive gesture at the end of its ramp.
pub const ARCHIVE_PROGRESSIVE_STAMP: f32 = 0.7;
/// Peak of the journal scale pop.
pub const JOURNAL_POP_SCALE: f32 = 1.08;
/// Horizontal scale of a fully thinned journal card.
pub const JOURNAL_THIN_SCALE_X: f32 = 0.05;
/// Glow reached by the journal gesture at the action threshold.
pub const JOURNAL_PROGRESSIVE_GLOW: f32 = 0.15;
/// Peak glow of the journal flash.
pub const JOURNAL_GLOW_PEAK: f32 = 0.6;
/// Overshoot scale of undo entries.
pub const ENTRY_OVERSHOOT_SCALE: f32 = 1.03;
/// Starting scale of a delete undo.
pub const DELETE_UNDO_START_SCALE: f32 = 0.8;

/// Exit-clearance offset of the archive choreography (ms).
pub const ARCHIVE_EXIT_CLEARANCE_MS: u64 = 550;
/// Exit-clearance offset of the journal choreography (ms).
pub const JOURNAL_EXIT_CLEARANCE_MS: u64 = 500;
/// Exit-clearance offset of the delete choreography (ms).
pub const DELETE_EXIT_CLEARANCE_MS: u64 = 1000;
/// Length of the delete dissolve (ms).
pub const DELETE_DISSOLVE_MS: u64 = 1100;

/// "Boxing up": crush height, then width, flash the stamp, drop off-stage.
#[must_use]
pub fn archive(options: &ChoreographyOptions) -> Timeline {
    Timeline::new("archive")
        .track(
            Track::new(VisualProperty::CrushProgress, 0, 250, 1.0)
                .eased(EasingFunction::CubicOut),
        )
        .track(
            Track::new(
                VisualProperty::ScaleX,
                200,
                200,
                ARCHIVE_CRUSHED_SCALE_X,
            )
                .eased(EasingFunction::CubicOut),
        )
        .track(
            Track::new(VisualProperty::StampOpacity, 380, 80, 1.0)
                .eased(EasingFunction::Linear),
        )
        .track(
            Track::new(
                VisualProperty::TranslateY,
                480,
                400,
                options.offstage_distance,
            )
            .eased(EasingFunction::QuadraticIn),
        )
        .marker(ARCHIVE_EXIT_CLEARANCE_MS, Signal::ExitClearance)
}

/// "Pickup and fly": pop, thin and flash, hold, then accelerate upward.
#[must_use]
pub fn journal(options: &ChoreographyOptions) -> Timeline {
    Timeline::new("journal")
        .track(
            Track::new(VisualProperty::Scale, 0, 100, JOURNAL_POP_SCALE)
                .eased(EasingFunction::QuadraticOut),
        )
        .track(
            Track::new(VisualProperty::Scale, 100, 200, 1.0)
                .eased(EasingFunction::CubicInOut),
        )
        .track(
            Track::new(VisualProperty::ScaleX, 0, 600, JOURNAL_THIN_SCALE_X)
                .eased(EasingFunction::CubicInOut),
        )
        .track(
            Track::new(VisualProperty::GlowOpacity, 0, 60, JOURNAL_GLOW_PEAK)
                .eased(EasingFunction::Linear),
        )
        .track(
            Track::new(VisualProperty::GlowOpacity, 60, 350, 0.0)
                .eased(EasingFunction::QuadraticOut),
        )
        .track(
            Track::new(
                VisualProperty::TranslateY,
                150,
                750,
                -options.offstage_distance,
            )
            .eased(EasingFunction::QuadraticIn),
        )
        .marker(JOURNAL_EXIT_CLEARANCE_MS, Signal::ExitClearance)
}

/// "Dissolve": a single linear progress scalar. The presentation layer
/// fades the content out within the first 15% and disperses the rest.
#[must_use]
pub fn delete() -> Timeline {
    Timeline::new("delete")
        .track(
            Track::new(
                VisualProperty::DissolveProgress,
                0,
                DELETE_DISSOLVE_MS,
                1.0,
            )
                .eased(EasingFunction::Linear),
        )
        .marker(DELETE_EXIT_CLEARANCE_MS, Signal::ExitClearance)
        .marker(DELETE_DISSOLVE_MS, Signal::DissolveVisualComplete)
}

/// Ease every property that differs from `rest` back to it.
#[must_use]
pub fn cancel(
    current: &VisualState,
    rest: &VisualState,
    options: &ChoreographyOptions,
) -> Timeline {
    let duration = options.cancel_ms;
    current
        .differing(rest, 1e-4)
        .fold(Timeline::new("cancel"), |timeline, property| {
            timeline.track(
                Track::new(property, 0, duration, rest.get(property))
                    .eased(EasingFunction::QuadraticOut),
            )
        })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn archive_timing() {
        let t = archive(&ChoreographyOptions::default());
        assert_eq!(t.total_duration(), ms(880));
        assert_eq!(t.marker_at(Signal::ExitClearance), Some(ms(550)));
        let translate = t
            .tracks()
            .iter()
            .find(|tr| tr.property == VisualProperty::TranslateY)
            .unwrap();
        assert_eq!(translate.start, ms(480));
        assert_eq!(translate.to, 1000.0);
    }

    #[test]
    fn journal_timing() {
        let t = journal(&ChoreographyOptions::default());
        assert_eq!(t.total_duration(), ms(900));
        assert_eq!(t.marker_at(Signal::ExitClearance), Some(ms(500)));
    }

    #[test]
    fn delete_timing() {
        let t = delete();
        assert_eq!(t.total_duration(), ms(1100));
        assert_eq!(t.marker_at(Signal::ExitClearance), Some(ms(1000)));
        assert_eq!(
            t.marker_at(Signal::DissolveVisualComplete),
            Some(ms(1100))
        );
    }

    #[test]
    fn exit_clearance_precedes_completion() {
        let opts = ChoreographyOptions::default();
        for t in [archive(&opts), journal(&opts), delete()] {
            let clearance = t.marker_at(Signal::ExitClearance).unwrap();
            assert!(clearance < t.total_duration(), "{}", t.name());
        }
    }

    #[test]
    fn cancel_only_touches_mutated_properties() {
        let opts = ChoreographyOptions::default();
        let mut current = VisualState::REST;
        current.position.y = -80.0;
        current.glow_opacity = 0.1;
        let t = cancel(&current, &VisualState::REST, &opts);
        assert_eq!(t.tracks().len(), 2);
        assert_eq!(t.total_duration(), ms(180));
        assert!(t.markers().is_empty());
    }

    #[test]
    fn cancel_at_rest_is_instant() {
        let opts = ChoreographyOptions::default();
        let t = cancel(&VisualState::REST, &VisualState::REST, &opts);
        assert_eq!(t.total_duration(), Duration::ZERO);
    }
}

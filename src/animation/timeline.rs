//! Declarative multi-phase timelines.
//!
//! A [`Timeline`] is a list of property [`Track`]s, each animating one
//! [`VisualProperty`] toward a target over a fixed window, plus timed
//! [`Marker`]s that raise lifecycle [`Signal`]s. Tracks carry no start
//! value: the runner captures whatever the property holds when the track
//! begins, so the same timeline plays from rest or continues a partially
//! progressed gesture without a jump.

use std::time::Duration;

use crate::card::VisualProperty;
use crate::util::easing::EasingFunction;

/// One property animated toward `to` over `[start, start + duration]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// The animated channel.
    pub property: VisualProperty,
    /// Offset from the timeline start.
    pub start: Duration,
    /// Length of the track.
    pub duration: Duration,
    /// Target value.
    pub to: f32,
    /// Curve applied to the track's local progress.
    pub easing: EasingFunction,
}

impl Track {
    /// Track with the default ease-out curve.
    #[must_use]
    pub fn new(
        property: VisualProperty,
        start_ms: u64,
        duration_ms: u64,
        to: f32,
    ) -> Self {
        Self {
            property,
            start: Duration::from_millis(start_ms),
            duration: Duration::from_millis(duration_ms),
            to,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Use a specific easing curve.
    #[must_use]
    pub fn eased(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Offset at which the track reaches its target.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// Lifecycle signal raised by a timeline marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Enough visual space has opened for the next card to move up.
    ExitClearance,
    /// The dissolve effect has visually settled.
    DissolveVisualComplete,
}

/// A signal raised once the timeline reaches `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Offset from the timeline start.
    pub at: Duration,
    /// Signal to raise.
    pub signal: Signal,
}

/// Ordered set of tracks and markers describing one choreography.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    name: &'static str,
    /// Sorted by start offset; later tracks win on shared properties.
    tracks: Vec<Track>,
    /// Sorted by offset.
    markers: Vec<Marker>,
}

impl Timeline {
    /// Empty timeline.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tracks: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Add a track, keeping start order (ties keep insertion order).
    #[must_use]
    pub fn track(mut self, track: Track) -> Self {
        let idx = self.tracks.partition_point(|t| t.start <= track.start);
        self.tracks.insert(idx, track);
        self
    }

    /// Add a marker raising `signal` at `at_ms`.
    #[must_use]
    pub fn marker(mut self, at_ms: u64, signal: Signal) -> Self {
        let marker = Marker {
            at: Duration::from_millis(at_ms),
            signal,
        };
        let idx = self.markers.partition_point(|m| m.at <= marker.at);
        self.markers.insert(idx, marker);
        self
    }

    /// Debug name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tracks in start order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Markers in time order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Offset of the first marker raising `signal`.
    #[must_use]
    pub fn marker_at(&self, signal: Signal) -> Option<Duration> {
        self.markers
            .iter()
            .find(|m| m.signal == signal)
            .map(|m| m.at)
    }

    /// Time at which every track has finished and every marker has fired.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        let tracks = self.tracks.iter().map(Track::end);
        let markers = self.markers.iter().map(|m| m.at);
        tracks.chain(markers).max().unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_are_kept_in_start_order() {
        let timeline = Timeline::new("t")
            .track(Track::new(VisualProperty::Scale, 100, 50, 1.0))
            .track(Track::new(VisualProperty::ScaleX, 0, 50, 1.0))
            .track(Track::new(VisualProperty::Opacity, 100, 10, 1.0));
        let props: Vec<_> =
            timeline.tracks().iter().map(|t| t.property).collect();
        assert_eq!(
            props,
            vec![
                VisualProperty::ScaleX,
                VisualProperty::Scale,
                VisualProperty::Opacity
            ]
        );
    }

    #[test]
    fn total_duration_covers_tracks_and_markers() {
        let timeline = Timeline::new("t")
            .track(Track::new(VisualProperty::Scale, 200, 300, 1.0))
            .marker(450, Signal::ExitClearance);
        assert_eq!(timeline.total_duration(), Duration::from_millis(500));

        let late_marker = timeline.marker(900, Signal::DissolveVisualComplete);
        assert_eq!(late_marker.total_duration(), Duration::from_millis(900));
        assert_eq!(
            late_marker.marker_at(Signal::ExitClearance),
            Some(Duration::from_millis(450))
        );
    }

    #[test]
    fn empty_timeline_is_instant() {
        assert_eq!(Timeline::new("empty").total_duration(), Duration::ZERO);
    }
}

//! Sliding-window pointer velocity estimate.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use web_time::Instant;

use super::event::PointerSample;

/// Samples older than this relative to the query time are ignored.
const WINDOW: Duration = Duration::from_millis(100);

/// Estimates pointer velocity from the samples of the last 100ms.
///
/// A pointer that has stopped moving reports zero velocity once its last
/// samples age out of the window, so a drag that pauses before release
/// never commits by velocity.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<PointerSample>,
}

impl VelocityTracker {
    /// Empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Record the pointer at `position` at time `at`.
    pub fn push(&mut self, at: Instant, position: Vec2) {
        self.samples.push_back(PointerSample {
            at,
            x: position.x,
            y: position.y,
        });
        while self
            .samples
            .front()
            .is_some_and(|s| at.saturating_duration_since(s.at) > WINDOW)
        {
            let _ = self.samples.pop_front();
        }
    }

    /// Velocity in units per second as of `now`.
    #[must_use]
    pub fn velocity(&self, now: Instant) -> Vec2 {
        let mut recent = self
            .samples
            .iter()
            .filter(|s| now.saturating_duration_since(s.at) <= WINDOW);
        let Some(first) = recent.next() else {
            return Vec2::ZERO;
        };
        let Some(last) = recent.last() else {
            return Vec2::ZERO;
        };
        let dt = last.at.saturating_duration_since(first.at).as_secs_f32();
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(last.x - first.x, last.y - first.y) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn steady_drag_velocity() {
        let t0 = Instant::now();
        let mut tracker = VelocityTracker::new();
        for i in 0..=10 {
            tracker.push(t0 + ms(i * 10), Vec2::new(0.0, -5.0 * i as f32));
        }
        let v = tracker.velocity(t0 + ms(100));
        assert!((v.y + 500.0).abs() < 1.0, "{v:?}");
        assert!(v.x.abs() < 1e-3);
    }

    #[test]
    fn old_samples_age_out() {
        let t0 = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.push(t0, Vec2::ZERO);
        tracker.push(t0 + ms(20), Vec2::new(0.0, 40.0));
        assert!(tracker.velocity(t0 + ms(20)).y > 1000.0);
        // Held still: nothing recent enough to estimate from.
        assert_eq!(tracker.velocity(t0 + ms(400)), Vec2::ZERO);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        tracker.push(t0, Vec2::new(3.0, 4.0));
        assert_eq!(tracker.velocity(t0), Vec2::ZERO);
        tracker.reset();
        assert_eq!(tracker.velocity(t0), Vec2::ZERO);
    }
}

use glam::Vec2;

/// One pointer-motion sample relative to the gesture's start point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Translation from the press point (negative y = up).
    pub translation: Vec2,
    /// Instantaneous velocity in units per second.
    pub velocity: Vec2,
}

impl GestureSample {
    /// Sample from raw components.
    #[must_use]
    pub fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self {
            translation: Vec2::new(dx, dy),
            velocity: Vec2::new(vx, vy),
        }
    }

    /// Copy with every non-finite component replaced by zero.
    ///
    /// Platforms occasionally report NaN deltas on the first frame of a
    /// drag; those ticks count as no displacement.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            translation: finite_or_zero(self.translation),
            velocity: finite_or_zero(self.velocity),
        }
    }
}

fn finite_or_zero(v: Vec2) -> Vec2 {
    let fix = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec2::new(fix(v.x), fix(v.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_zeroes_non_finite_components() {
        let sample =
            GestureSample::new(f32::NAN, -40.0, f32::INFINITY, -300.0)
                .sanitized();
        assert_eq!(sample, GestureSample::new(0.0, -40.0, 0.0, -300.0));
    }

    #[test]
    fn sanitized_keeps_finite_samples() {
        let sample = GestureSample::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(sample.sanitized(), sample);
    }
}

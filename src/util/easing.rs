//! Easing functions for animation interpolation.
//!
//! Every choreography phase, rank transition and spring-back maps its raw
//! progress through one of these curves. All functions are designed for
//! <100ns evaluation time so they can run every display frame.

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out (sharper deceleration than quadratic).
    CubicOut,
    /// Cubic ease-in-out (symmetric acceleration and deceleration).
    CubicInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing function: CubicHermite with c1=0.33, c2=1.0 for natural
    /// ease-out feel.
    pub const DEFAULT: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                // f(t) = c0(1-t)³ + c1·3t(1-t)² + c2·3(1-t)t² + c3·t³
                // where c0=0.0, c3=1.0
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::CubicOut,
        EasingFunction::CubicInOut,
        EasingFunction::DEFAULT,
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!(
                (easing.evaluate(1.0) - 1.0).abs() < 1e-6,
                "{easing:?} at 1"
            );
        }
    }

    #[test]
    fn test_input_clamping() {
        for easing in ALL {
            assert!(easing.evaluate(-0.5).abs() < 1e-6);
            assert!((easing.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ease_out_curves_lead_linear() {
        for easing in [
            EasingFunction::QuadraticOut,
            EasingFunction::CubicOut,
            EasingFunction::DEFAULT,
        ] {
            assert!(easing.evaluate(0.25) > 0.25, "{easing:?}");
        }
    }

    #[test]
    fn test_quadratic_in_lags_linear() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
    }

    #[test]
    fn test_cubic_in_out_is_symmetric() {
        let f = EasingFunction::CubicInOut;
        assert!((f.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!((f.evaluate(0.25) + f.evaluate(0.75) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_default_is_cubic_hermite() {
        assert_eq!(
            EasingFunction::default(),
            EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 }
        );
    }
}

use glam::Vec2;

/// Vertical scale reached at full crush (`crush_progress == 1`).
const CRUSHED_SCALE_Y: f32 = 0.2;

/// Dissolve progress at which the card's content has fully faded out.
const CONTENT_FADE_END: f32 = 0.15;

/// Continuous visual properties of one card, re-evaluated every frame.
///
/// Every field is independently interpolatable. Vertical scale and content
/// opacity are derived rather than stored so they can never disagree with
/// the crush and dissolve progress that drive them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Translation from the card's rest position (negative y = up).
    pub position: Vec2,
    /// Uniform scale.
    pub scale: f32,
    /// Horizontal-only scale, multiplied with `scale`.
    pub scale_x: f32,
    /// Whole-card opacity.
    pub opacity: f32,
    /// Opacity of the glow layer behind the card.
    pub glow_opacity: f32,
    /// Opacity of the archive stamp flash.
    pub stamp_opacity: f32,
    /// Archive crush progress in [0, 1].
    pub crush_progress: f32,
    /// Delete dissolve progress in [0, 1].
    pub dissolve_progress: f32,
}

impl VisualState {
    /// The front card at rest.
    pub const REST: VisualState = VisualState {
        position: Vec2::ZERO,
        scale: 1.0,
        scale_x: 1.0,
        opacity: 1.0,
        glow_opacity: 0.0,
        stamp_opacity: 0.0,
        crush_progress: 0.0,
        dissolve_progress: 0.0,
    };

    /// Vertical scale derived from crush progress (1.0 → 0.2).
    #[must_use]
    pub fn scale_y(&self) -> f32 {
        1.0 - (1.0 - CRUSHED_SCALE_Y) * self.crush_progress.clamp(0.0, 1.0)
    }

    /// Opacity of the card's content during a dissolve.
    ///
    /// Content is gone by 15% dissolve progress; the presentation layer
    /// renders the dispersing fragments for the remainder.
    #[must_use]
    pub fn content_opacity(&self) -> f32 {
        1.0 - (self.dissolve_progress / CONTENT_FADE_END).clamp(0.0, 1.0)
    }

    /// Read a single property.
    #[must_use]
    pub fn get(&self, property: VisualProperty) -> f32 {
        match property {
            VisualProperty::TranslateX => self.position.x,
            VisualProperty::TranslateY => self.position.y,
            VisualProperty::Scale => self.scale,
            VisualProperty::ScaleX => self.scale_x,
            VisualProperty::Opacity => self.opacity,
            VisualProperty::GlowOpacity => self.glow_opacity,
            VisualProperty::StampOpacity => self.stamp_opacity,
            VisualProperty::CrushProgress => self.crush_progress,
            VisualProperty::DissolveProgress => self.dissolve_progress,
        }
    }

    /// Write a single property.
    pub fn set(&mut self, property: VisualProperty, value: f32) {
        match property {
            VisualProperty::TranslateX => self.position.x = value,
            VisualProperty::TranslateY => self.position.y = value,
            VisualProperty::Scale => self.scale = value,
            VisualProperty::ScaleX => self.scale_x = value,
            VisualProperty::Opacity => self.opacity = value,
            VisualProperty::GlowOpacity => self.glow_opacity = value,
            VisualProperty::StampOpacity => self.stamp_opacity = value,
            VisualProperty::CrushProgress => self.crush_progress = value,
            VisualProperty::DissolveProgress => self.dissolve_progress = value,
        }
    }

    /// Properties whose value differs from `other` by more than `epsilon`.
    pub fn differing(
        &self,
        other: &Self,
        epsilon: f32,
    ) -> impl Iterator<Item = VisualProperty> + '_ {
        let other = *other;
        VisualProperty::ALL.into_iter().filter(move |&p| {
            (self.get(p) - other.get(p)).abs() > epsilon
        })
    }

    /// Whether every property is within `epsilon` of `other`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.differing(other, epsilon).next().is_none()
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

/// Addressable scalar channel of a [`VisualState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualProperty {
    /// Horizontal translation.
    TranslateX,
    /// Vertical translation.
    TranslateY,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Whole-card opacity.
    Opacity,
    /// Glow opacity.
    GlowOpacity,
    /// Stamp flash opacity.
    StampOpacity,
    /// Archive crush progress.
    CrushProgress,
    /// Delete dissolve progress.
    DissolveProgress,
}

impl VisualProperty {
    /// Every channel, in declaration order.
    pub const ALL: [VisualProperty; 9] = [
        VisualProperty::TranslateX,
        VisualProperty::TranslateY,
        VisualProperty::Scale,
        VisualProperty::ScaleX,
        VisualProperty::Opacity,
        VisualProperty::GlowOpacity,
        VisualProperty::StampOpacity,
        VisualProperty::CrushProgress,
        VisualProperty::DissolveProgress,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_cover_every_channel() {
        let mut state = VisualState::REST;
        for (i, property) in VisualProperty::ALL.into_iter().enumerate() {
            state.set(property, i as f32 + 0.5);
        }
        for (i, property) in VisualProperty::ALL.into_iter().enumerate() {
            assert_eq!(state.get(property), i as f32 + 0.5);
        }
    }

    #[test]
    fn crush_maps_to_vertical_scale() {
        let mut state = VisualState::REST;
        assert_eq!(state.scale_y(), 1.0);
        state.crush_progress = 1.0;
        assert!((state.scale_y() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn content_fades_within_first_fifteen_percent() {
        let mut state = VisualState::REST;
        state.dissolve_progress = 0.075;
        assert!((state.content_opacity() - 0.5).abs() < 1e-5);
        state.dissolve_progress = 0.15;
        assert_eq!(state.content_opacity(), 0.0);
        state.dissolve_progress = 0.9;
        assert_eq!(state.content_opacity(), 0.0);
    }

    #[test]
    fn differing_lists_changed_channels_only() {
        let mut state = VisualState::REST;
        state.glow_opacity = 0.4;
        state.position.y = -12.0;
        let changed: Vec<_> =
            state.differing(&VisualState::REST, 1e-4).collect();
        assert_eq!(
            changed,
            vec![VisualProperty::TranslateY, VisualProperty::GlowOpacity]
        );
        assert!(!state.approx_eq(&VisualState::REST, 1e-4));
    }
}

//! Converts raw platform events into deck commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! press origin, recent motion for velocity) and the key-binding map. It is
//! the only thing that sits between raw window events and the deck's
//! command channel.

use glam::Vec2;
use web_time::Instant;

use super::event::{InputEvent, MouseButton};
use super::velocity::VelocityTracker;
use crate::deck::DeckCommand;
use crate::gesture::GestureSample;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`DeckCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input.handle_event(event, Instant::now()) {
///     deck.send(cmd)?;
/// }
///
/// if let Some(cmd) = input.handle_key_press("KeyA") {
///     deck.send(cmd)?;
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    /// Last known cursor position.
    cursor: Vec2,
    /// Where the primary button went down, while it is held.
    press_origin: Option<Vec2>,
    /// Recent motion while pressed.
    velocity: VelocityTracker,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: Vec2::ZERO,
            press_origin: None,
            velocity: VelocityTracker::new(),
            key_bindings,
        }
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether a primary press (and so a gesture) is in progress.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Look up a key press and return the trigger it is bound to, if any.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<DeckCommand> {
        self.key_bindings.lookup(key).map(DeckCommand::trigger)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Option<DeckCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y), now)
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed, now)
            }
        }
    }

    /// Cursor moved: a gesture update while pressed.
    fn handle_cursor_moved(
        &mut self,
        position: Vec2,
        now: Instant,
    ) -> Option<DeckCommand> {
        self.cursor = position;
        let origin = self.press_origin?;
        self.velocity.push(now, position);
        Some(DeckCommand::GestureUpdate(self.sample(origin, now)))
    }

    /// Primary press starts a gesture; release ends it. Other buttons are
    /// ignored.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        now: Instant,
    ) -> Option<DeckCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            if self.press_origin.is_some() {
                return None;
            }
            self.press_origin = Some(self.cursor);
            self.velocity.reset();
            self.velocity.push(now, self.cursor);
            return Some(DeckCommand::GestureStart);
        }

        let origin = self.press_origin.take()?;
        let sample = self.sample(origin, now);
        self.velocity.reset();
        Some(DeckCommand::GestureEnd(sample))
    }

    fn sample(&self, origin: Vec2, now: Instant) -> GestureSample {
        GestureSample {
            translation: self.cursor - origin,
            velocity: self.velocity.velocity(now),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::card::CommitAction;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn update(command: Option<DeckCommand>) -> Option<GestureSample> {
        match command {
            Some(DeckCommand::GestureUpdate(sample)) => Some(sample),
            _ => None,
        }
    }

    fn end(command: Option<DeckCommand>) -> Option<GestureSample> {
        match command {
            Some(DeckCommand::GestureEnd(sample)) => Some(sample),
            _ => None,
        }
    }

    fn left(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn press_drag_release_produces_gesture() {
        let mut input = InputProcessor::new();
        let t0 = Instant::now();
        assert_eq!(input.handle_event(moved(50.0, 400.0), t0), None);
        assert_eq!(
            input.handle_event(left(true), t0),
            Some(DeckCommand::GestureStart)
        );

        let mut last = None;
        for i in 1..=10_u64 {
            let y = 400.0 - 10.0 * i as f32;
            last = input.handle_event(moved(50.0, y), t0 + ms(i * 10));
        }
        let sample = update(last).unwrap();
        assert_eq!(sample.translation, Vec2::new(0.0, -100.0));
        assert!((sample.velocity.y + 1000.0).abs() < 5.0);

        let released =
            end(input.handle_event(left(false), t0 + ms(100))).unwrap();
        assert_eq!(released.translation, Vec2::new(0.0, -100.0));
        assert!(!input.is_pressed());
    }

    #[test]
    fn pause_before_release_drops_velocity() {
        let mut input = InputProcessor::new();
        let t0 = Instant::now();
        let _ = input.handle_event(left(true), t0);
        let _ = input.handle_event(moved(0.0, 60.0), t0 + ms(20));
        let released =
            end(input.handle_event(left(false), t0 + ms(500))).unwrap();
        assert_eq!(released.velocity, Vec2::ZERO);
        assert_eq!(released.translation.y, 60.0);
    }

    #[test]
    fn other_buttons_and_hover_are_ignored() {
        let mut input = InputProcessor::new();
        let t0 = Instant::now();
        let right = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        };
        assert_eq!(input.handle_event(right, t0), None);
        assert_eq!(input.handle_event(moved(10.0, 10.0), t0), None);
        assert_eq!(input.handle_event(left(false), t0), None);
    }

    #[test]
    fn keys_map_to_triggers() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("KeyJ"),
            Some(DeckCommand::trigger(CommitAction::Journal))
        );
        assert_eq!(input.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn rebinding_keys() {
        let mut input = InputProcessor::new();
        let _ = input
            .key_bindings_mut()
            .bindings
            .insert("KeyQ".into(), CommitAction::Delete);
        assert_eq!(
            input.handle_key_press("KeyQ"),
            Some(DeckCommand::trigger(CommitAction::Delete))
        );
    }
}

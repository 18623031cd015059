use web_time::Instant;

/// Platform-agnostic pointer events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`DeckCommand`](crate::deck::DeckCommand) values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
///     Instant::now(),
/// ) {
///     deck_handle.send(cmd)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor or touch point moved to an absolute stage position.
    CursorMoved {
        /// Horizontal position in layout units.
        x: f32,
        /// Vertical position in layout units (down is positive).
        y: f32,
    },
    /// Mouse button or touch contact changed.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Platform-agnostic mouse button identifier. Touch contacts report as
/// [`MouseButton::Left`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// One timestamped pointer position, as kept by the velocity tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PointerSample {
    pub(crate) at: Instant,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

//! Event handling.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Rows moved per mouse wheel notch.
pub const WHEEL_SCROLL_ROWS: i32 = 3;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Not handled; nothing changed.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed and the screen needs a redraw.
    Consumed,
}

impl EventResult {
    /// Maps a "did anything change" flag to a result.
    #[must_use]
    pub const fn from_changed(changed: bool) -> Self {
        if changed { Self::Consumed } else { Self::Continue }
    }
}

/// Key presses only. Repeats and releases reported by some terminals are dropped.
#[must_use]
pub fn key_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

/// Signed row delta for a wheel event.
#[must_use]
pub const fn wheel_delta(kind: MouseEventKind) -> Option<i32> {
    match kind {
        MouseEventKind::ScrollDown => Some(WHEEL_SCROLL_ROWS),
        MouseEventKind::ScrollUp => Some(-WHEEL_SCROLL_ROWS),
        _ => None,
    }
}

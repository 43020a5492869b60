//! Input events understood by [`crate::CommandEditor::handle`].
//!
//! Hosts translate their own key/mouse events into these. Pointer coordinates are viewport-relative
//! cells: row 0 is the first visible line and column 0 is the left edge of the gutter.

/// Named keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Undo,
    Redo,
}

/// Mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// The pointer moved without a button held.
    Move { row: usize, column: usize },
    /// A button was pressed.
    Click { row: usize, column: usize },
    /// The pointer moved with a button held.
    Drag { row: usize, column: usize },
    /// Wheel notches; positive scrolls toward the end of the text.
    Scroll { delta: isize },
}

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A typed character. `'\n'`, `'\r'` and `'\t'` act like Enter and Tab; other control
    /// characters are ignored.
    Char(char),
    Key(ControlKey),
    Pointer(PointerEvent),
    /// The viewport changed size (in cells).
    Resize { width: usize, height: usize },
}

impl From<ControlKey> for InputEvent {
    fn from(key: ControlKey) -> Self {
        InputEvent::Key(key)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<char> for InputEvent {
    fn from(ch: char) -> Self {
        InputEvent::Char(ch)
    }
}

//! Raw events delivered by the host platform.
//!
//! These are what a window system hands the shell before any translation:
//! physical key codes, pointer positions in view pixels, resizes and the
//! close request.

/// A pointer location in the displayed view's pixel space.
///
/// The origin is the bottom-left corner of the view and `y` grows upward,
/// which is the convention of the desktop window systems the shell targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the view that displays the scaled virtual screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Size of the window's content area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One event from the host platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A key went down.  `characters` is the text the key produces ignoring
    /// modifiers; it is empty for keys without text (arrows, function keys).
    KeyDown { code: u16, characters: String },
    /// A key came up.
    KeyUp { code: u16 },
    PointerDown(ViewPoint),
    /// The pointer moved while a button is held.
    PointerMove(ViewPoint),
    PointerUp,
    /// The window content area changed size.
    Resize(WindowSize),
    /// The user closed the window.
    Close,
}

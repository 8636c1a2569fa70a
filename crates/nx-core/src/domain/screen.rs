//! Virtual screen transform.
//!
//! The console always renders a fixed 160×128 frame.  The shell shows it at
//! the largest whole-number scale that fits the window and maps pointer
//! positions from view pixels back into virtual screen coordinates.

use super::platform::{ViewPoint, ViewSize, WindowSize};

/// Width of the console's virtual screen in pixels.
pub const SCREEN_WIDTH: u32 = 160;
/// Height of the console's virtual screen in pixels.
pub const SCREEN_HEIGHT: u32 = 128;

/// A position in virtual screen coordinates, before truncation.
///
/// `y` grows downward from the top edge of the virtual screen, so a point
/// above the view's top edge has `y < 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualPoint {
    pub x: f64,
    pub y: f64,
}

impl VirtualPoint {
    /// Integer coordinates as forwarded to the core (truncated toward zero).
    pub fn to_pixels(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    /// `false` when the point lies above the top edge of the virtual screen.
    pub fn is_below_top_edge(self) -> bool {
        self.y >= 0.0
    }
}

/// The integer scale and the exact surface size chosen for a window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFit {
    /// Whole-number magnification, at least 1.
    pub scale: u32,
    /// Surface width: `scale * SCREEN_WIDTH`.
    pub width: u32,
    /// Surface height: `scale * SCREEN_HEIGHT`.
    pub height: u32,
}

/// Constant virtual resolution plus the pure mapping functions over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTransform {
    width: u32,
    height: u32,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl ScreenTransform {
    /// Creates a transform for a `width`×`height` virtual screen.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps a point in view pixels to virtual screen coordinates.
    ///
    /// `x_v = x * W / vw` and `y_v = H - y * H / vh`; the vertical axis flips
    /// because view coordinates grow upward.  Returns `None` for a view with
    /// no area.
    pub fn to_virtual(&self, point: ViewPoint, view: ViewSize) -> Option<VirtualPoint> {
        if !(view.width > 0.0 && view.height > 0.0) {
            return None;
        }
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        Some(VirtualPoint {
            x: point.x * w / view.width,
            y: h - point.y * h / view.height,
        })
    }

    /// Computes the largest whole-number scale that fits `window`.
    ///
    /// `scale = max(1, floor(min(w / W, h / H)))`.  Degenerate window sizes
    /// (zero, negative, NaN) fall back to scale 1, and huge ones are capped at
    /// the largest scale whose surface still fits in `u32`.
    pub fn fit(&self, window: WindowSize) -> DisplayFit {
        let by_width = window.width / f64::from(self.width);
        let by_height = window.height / f64::from(self.height);
        let factor = by_width.min(by_height).floor();
        // The surface must stay representable in u32 pixels.
        let max_scale = u32::MAX / self.width.max(self.height).max(1);
        let scale = if factor.is_finite() && factor >= 1.0 {
            (factor.min(f64::from(max_scale)) as u32).max(1)
        } else {
            1
        };
        DisplayFit {
            scale,
            width: scale * self.width,
            height: scale * self.height,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

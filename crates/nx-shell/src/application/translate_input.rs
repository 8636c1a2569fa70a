//! TranslateInputUseCase: turns platform input into the core's device events.
//!
//! This use case sits at the application layer and forwards every translated
//! event straight to a [`DeviceInput`] (the running core).  It keeps no level
//! state for keys: one key-down yields at most one press and one key-up at
//! most one release.  The only state it holds is the current view size and
//! whether a pointer drag is in progress.

use nx_core::{DeviceEvent, DeviceInput, KeyMapper, ScreenTransform, ViewPoint, ViewSize};
use tracing::trace;

/// The Translate Input use case.
pub struct TranslateInputUseCase {
    transform: ScreenTransform,
    view: ViewSize,
    dragging: bool,
}

impl TranslateInputUseCase {
    /// Creates a translator for a view of `view` pixels showing `transform`'s
    /// virtual screen.
    pub fn new(transform: ScreenTransform, view: ViewSize) -> Self {
        Self {
            transform,
            view,
            dragging: false,
        }
    }

    /// Updates the size of the view after a resize.
    pub fn set_view(&mut self, view: ViewSize) {
        self.view = view;
    }

    pub fn view(&self) -> ViewSize {
        self.view
    }

    /// `true` between a pointer-down and the matching pointer-up.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Handles a key-down.  Returns the event forwarded to the core, if any.
    pub fn on_key_down(
        &self,
        input: &mut dyn DeviceInput,
        code: u16,
        characters: &str,
    ) -> Option<DeviceEvent> {
        let event = KeyMapper::key_down(code, characters);
        forward(input, event)
    }

    /// Handles a key-up.  Returns the event forwarded to the core, if any.
    pub fn on_key_up(&self, input: &mut dyn DeviceInput, code: u16) -> Option<DeviceEvent> {
        forward(input, KeyMapper::key_up(code))
    }

    /// Handles a pointer-down.
    ///
    /// A press above the top edge of the virtual screen is suppressed.  The
    /// drag still starts, so the following moves and the release are
    /// forwarded as the platform delivers them.
    pub fn on_pointer_down(
        &mut self,
        input: &mut dyn DeviceInput,
        pos: ViewPoint,
    ) -> Option<DeviceEvent> {
        self.dragging = true;
        let point = self.transform.to_virtual(pos, self.view)?;
        if !point.is_below_top_edge() {
            trace!(y = point.y, "pointer-down outside the virtual screen suppressed");
            return None;
        }
        let (x, y) = point.to_pixels();
        forward(input, Some(DeviceEvent::TouchPressed { x, y }))
    }

    /// Handles a pointer move.  Forwarded only while a drag is active, with
    /// no bounds check.
    pub fn on_pointer_move(
        &mut self,
        input: &mut dyn DeviceInput,
        pos: ViewPoint,
    ) -> Option<DeviceEvent> {
        if !self.dragging {
            return None;
        }
        let (x, y) = self.transform.to_virtual(pos, self.view)?.to_pixels();
        forward(input, Some(DeviceEvent::TouchDragged { x, y }))
    }

    /// Handles a pointer-up, ending the drag.
    pub fn on_pointer_up(&mut self, input: &mut dyn DeviceInput) -> Option<DeviceEvent> {
        if !std::mem::take(&mut self.dragging) {
            return None;
        }
        forward(input, Some(DeviceEvent::TouchReleased))
    }

    /// Forgets an in-progress drag (e.g., when the window loses focus).
    pub fn reset(&mut self) {
        self.dragging = false;
    }
}

fn forward(input: &mut dyn DeviceInput, event: Option<DeviceEvent>) -> Option<DeviceEvent> {
    let event = event?;
    trace!(?event, "forwarding device event");
    event.apply(input);
    Some(event)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

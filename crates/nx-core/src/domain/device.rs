//! Abstract device vocabulary understood by the core.
//!
//! The core owns the level state of both gamepads, the touch pointer and the
//! keyboard buffer.  The shell never stores levels itself; it only emits the
//! edge events defined here.

use crate::console::DeviceInput;

/// The six buttons of a virtual gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    Left,
    Right,
    Up,
    Down,
    A,
    B,
}

/// Index of one of the two virtual gamepads.
///
/// Only `0` and `1` exist; the constructor rejects anything else so that an
/// out-of-range index can never reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadIndex(u8);

impl PadIndex {
    /// Gamepad 0, driven by the arrow cluster.
    pub const FIRST: PadIndex = PadIndex(0);
    /// Gamepad 1, driven by the D/F/G/R cluster.
    pub const SECOND: PadIndex = PadIndex(1);

    /// Number of virtual gamepads the keyboard provides.
    pub const COUNT: u8 = 2;

    /// Returns the pad index for `index`, or `None` when it is not 0 or 1.
    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(PadIndex(index))
    }

    /// Returns the raw index.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// One translated input event, ready to be forwarded to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    GamepadPressed { pad: PadIndex, button: GamepadButton },
    GamepadReleased { pad: PadIndex, button: GamepadButton },
    TouchPressed { x: i32, y: i32 },
    TouchDragged { x: i32, y: i32 },
    TouchReleased,
    /// An uppercased character with a code point below 127.
    KeyPressed(u8),
    /// Return / Enter.
    ConfirmPressed,
    /// Backspace.
    DeletePressed,
}

impl DeviceEvent {
    /// Forwards this event to the matching completion call on `input`.
    pub fn apply(self, input: &mut dyn DeviceInput) {
        match self {
            DeviceEvent::GamepadPressed { pad, button } => input.gamepad_pressed(pad, button),
            DeviceEvent::GamepadReleased { pad, button } => input.gamepad_released(pad, button),
            DeviceEvent::TouchPressed { x, y } => input.touch_pressed(x, y),
            DeviceEvent::TouchDragged { x, y } => input.touch_dragged(x, y),
            DeviceEvent::TouchReleased => input.touch_released(),
            DeviceEvent::KeyPressed(key) => input.key_pressed(key),
            DeviceEvent::ConfirmPressed => input.confirm_pressed(),
            DeviceEvent::DeletePressed => input.delete_pressed(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<String>);

    impl DeviceInput for Calls {
        fn touch_pressed(&mut self, x: i32, y: i32) {
            self.0.push(format!("touch_pressed({x},{y})"));
        }
        fn touch_dragged(&mut self, x: i32, y: i32) {
            self.0.push(format!("touch_dragged({x},{y})"));
        }
        fn touch_released(&mut self) {
            self.0.push("touch_released".into());
        }
        fn gamepad_pressed(&mut self, pad: PadIndex, button: GamepadButton) {
            self.0.push(format!("gamepad_pressed({},{button:?})", pad.get()));
        }
        fn gamepad_released(&mut self, pad: PadIndex, button: GamepadButton) {
            self.0.push(format!("gamepad_released({},{button:?})", pad.get()));
        }
        fn key_pressed(&mut self, key: u8) {
            self.0.push(format!("key_pressed({})", key as char));
        }
        fn confirm_pressed(&mut self) {
            self.0.push("confirm_pressed".into());
        }
        fn delete_pressed(&mut self) {
            self.0.push("delete_pressed".into());
        }
    }

    #[test]
    fn test_pad_index_accepts_only_zero_and_one() {
        assert_eq!(PadIndex::new(0), Some(PadIndex::FIRST));
        assert_eq!(PadIndex::new(1), Some(PadIndex::SECOND));
        assert_eq!(PadIndex::new(2), None);
        assert_eq!(PadIndex::new(255), None);
    }

    #[test]
    fn test_apply_routes_each_event_to_its_completion_call() {
        // Arrange
        let mut calls = Calls::default();
        let events = [
            DeviceEvent::GamepadPressed { pad: PadIndex::SECOND, button: GamepadButton::A },
            DeviceEvent::GamepadReleased { pad: PadIndex::SECOND, button: GamepadButton::A },
            DeviceEvent::TouchPressed { x: 3, y: 4 },
            DeviceEvent::TouchDragged { x: 5, y: 6 },
            DeviceEvent::TouchReleased,
            DeviceEvent::KeyPressed(b'Q'),
            DeviceEvent::ConfirmPressed,
            DeviceEvent::DeletePressed,
        ];

        // Act
        for event in events {
            event.apply(&mut calls);
        }

        // Assert
        assert_eq!(
            calls.0,
            vec![
                "gamepad_pressed(1,A)",
                "gamepad_released(1,A)",
                "touch_pressed(3,4)",
                "touch_dragged(5,6)",
                "touch_released",
                "key_pressed(Q)",
                "confirm_pressed",
                "delete_pressed",
            ]
        );
    }
}

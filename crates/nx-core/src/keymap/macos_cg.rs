//! macOS `CGKeyCode` to virtual gamepad binding table.
//!
//! CGKeyCode values are defined in Carbon Events.h (HIToolbox framework) and
//! identify key *positions*, not characters, so the layout below stays put on
//! non-QWERTY keyboards.
//!
//! ```text
//!  gamepad 0                    gamepad 1
//!  ←  →  ↓  ↑   Z/,   X/.       D  G  F  R   A   S
//!  L  R  D  U    A     B        L  R  D  U   A   B
//! ```

use crate::domain::device::{GamepadButton, PadIndex};

pub const KVK_ANSI_A: u16 = 0x00;
pub const KVK_ANSI_S: u16 = 0x01;
pub const KVK_ANSI_D: u16 = 0x02;
pub const KVK_ANSI_F: u16 = 0x03;
pub const KVK_ANSI_G: u16 = 0x05;
pub const KVK_ANSI_Z: u16 = 0x06;
pub const KVK_ANSI_X: u16 = 0x07;
pub const KVK_ANSI_R: u16 = 0x0F;
pub const KVK_ANSI_COMMA: u16 = 0x2B;
pub const KVK_ANSI_PERIOD: u16 = 0x2F;
pub const KVK_RETURN: u16 = 0x24;
pub const KVK_DELETE: u16 = 0x33;
pub const KVK_LEFT_ARROW: u16 = 0x7B;
pub const KVK_RIGHT_ARROW: u16 = 0x7C;
pub const KVK_DOWN_ARROW: u16 = 0x7D;
pub const KVK_UP_ARROW: u16 = 0x7E;

/// Translates a macOS `CGKeyCode` to the gamepad button it drives.
///
/// Returns `None` for every key outside the two six-button clusters; those
/// keys are handled as text.
///
/// # Panics
///
/// This function never panics.
pub fn cgkeycode_to_binding(code: u16) -> Option<(PadIndex, GamepadButton)> {
    let binding = match code {
        // Gamepad 0: arrow cluster plus Z/X (or ,/.) for the action buttons
        KVK_LEFT_ARROW => (PadIndex::FIRST, GamepadButton::Left),
        KVK_RIGHT_ARROW => (PadIndex::FIRST, GamepadButton::Right),
        KVK_DOWN_ARROW => (PadIndex::FIRST, GamepadButton::Down),
        KVK_UP_ARROW => (PadIndex::FIRST, GamepadButton::Up),
        KVK_ANSI_Z | KVK_ANSI_COMMA => (PadIndex::FIRST, GamepadButton::A),
        KVK_ANSI_X | KVK_ANSI_PERIOD => (PadIndex::FIRST, GamepadButton::B),

        // Gamepad 1: D/G/F/R cluster plus A/S for the action buttons
        KVK_ANSI_D => (PadIndex::SECOND, GamepadButton::Left),
        KVK_ANSI_G => (PadIndex::SECOND, GamepadButton::Right),
        KVK_ANSI_F => (PadIndex::SECOND, GamepadButton::Down),
        KVK_ANSI_R => (PadIndex::SECOND, GamepadButton::Up),
        KVK_ANSI_A => (PadIndex::SECOND, GamepadButton::A),
        KVK_ANSI_S => (PadIndex::SECOND, GamepadButton::B),

        _ => return None,
    };
    Some(binding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_documented_codes() {
        let expected: &[(u16, u8, GamepadButton)] = &[
            (123, 0, GamepadButton::Left),
            (124, 0, GamepadButton::Right),
            (125, 0, GamepadButton::Down),
            (126, 0, GamepadButton::Up),
            (6, 0, GamepadButton::A),
            (43, 0, GamepadButton::A),
            (7, 0, GamepadButton::B),
            (47, 0, GamepadButton::B),
            (2, 1, GamepadButton::Left),
            (5, 1, GamepadButton::Right),
            (3, 1, GamepadButton::Down),
            (15, 1, GamepadButton::Up),
            (0, 1, GamepadButton::A),
            (1, 1, GamepadButton::B),
        ];
        for &(code, pad, button) in expected {
            let (got_pad, got_button) = cgkeycode_to_binding(code)
                .unwrap_or_else(|| panic!("code {code} must be bound"));
            assert_eq!((got_pad.get(), got_button), (pad, button), "code {code}");
        }
    }

    #[test]
    fn test_exactly_fourteen_codes_are_bound() {
        let bound = (0..=u16::MAX).filter(|&c| cgkeycode_to_binding(c).is_some()).count();
        assert_eq!(bound, 14);
    }

    #[test]
    fn test_return_and_delete_are_not_gamepad_keys() {
        assert_eq!(cgkeycode_to_binding(KVK_RETURN), None);
        assert_eq!(cgkeycode_to_binding(KVK_DELETE), None);
    }
}

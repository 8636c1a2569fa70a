//! Physical key translation.
//!
//! Every key-down first goes through the gamepad table; only keys that are not
//! part of either gamepad cluster become text.  Text follows three rules:
//!
//! - `"\r"` (Return) becomes the dedicated *confirm* signal,
//! - `"\u{7F}"` (Backspace on macOS) becomes the dedicated *delete* signal,
//! - anything else is uppercased and its first code point is forwarded as a
//!   key press when it is below 127; other characters are dropped.

pub mod macos_cg;

use crate::domain::device::{DeviceEvent, GamepadButton, PadIndex};

/// Text produced by the Return key.
const RETURN_TEXT: &str = "\r";
/// Text produced by the Backspace key.
const BACKSPACE_TEXT: &str = "\u{7F}";
/// First code point that is not forwarded to the core's keyboard.
const FIRST_UNSUPPORTED_CODE_POINT: u32 = 127;

/// Unified key mapper for the shell.
pub struct KeyMapper;

impl KeyMapper {
    /// Returns the gamepad button bound to a physical key, if any.
    pub fn binding(code: u16) -> Option<(PadIndex, GamepadButton)> {
        macos_cg::cgkeycode_to_binding(code)
    }

    /// Translates a key-down with its unmodified `characters`.
    ///
    /// Returns `None` when the key produces nothing the core understands.
    pub fn key_down(code: u16, characters: &str) -> Option<DeviceEvent> {
        match Self::binding(code) {
            Some((pad, button)) => Some(DeviceEvent::GamepadPressed { pad, button }),
            None => Self::text(characters),
        }
    }

    /// Translates a key-up.  Only gamepad keys have a release event.
    pub fn key_up(code: u16) -> Option<DeviceEvent> {
        Self::binding(code).map(|(pad, button)| DeviceEvent::GamepadReleased { pad, button })
    }

    /// Translates typed text to a keyboard event.
    pub fn text(characters: &str) -> Option<DeviceEvent> {
        match characters {
            "" => None,
            RETURN_TEXT => Some(DeviceEvent::ConfirmPressed),
            BACKSPACE_TEXT => Some(DeviceEvent::DeletePressed),
            _ => {
                let first = characters.to_uppercase().chars().next()?;
                if u32::from(first) < FIRST_UNSUPPORTED_CODE_POINT {
                    Some(DeviceEvent::KeyPressed(first as u8))
                } else {
                    None
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

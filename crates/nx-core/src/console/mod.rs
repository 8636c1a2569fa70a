//! The contract between the shell and the console core.
//!
//! The core is a virtual machine the shell does not look inside.  It exposes
//! a small callback surface:
//!
//! - **completion calls** the shell makes into it ([`DeviceInput`],
//!   [`DiskDrive`], [`Console`]), and
//! - **delegate callbacks** it makes back into the shell while it runs
//!   ([`CoreDelegate`]).
//!
//! # Why a delegate trait object? (for beginners)
//!
//! A C-style core would store an opaque `void *context` and cast it back to
//! the shell's state inside each callback.  Here the shell hands the core a
//! `&mut dyn CoreDelegate` for the duration of each frame.  The borrow checker
//! guarantees the delegate is alive while the core calls it, and that nothing
//! else touches it at the same time, without any unsafe pointer recovery.

use thiserror::Error;

use crate::domain::device::{GamepadButton, PadIndex};
use crate::domain::disk::VirtualDiskImage;

/// An error reported by the core: a program fault or a rejected disk image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", line_suffix(.line))]
pub struct CoreError {
    /// Human-readable message, e.g. `"Syntax error"`.
    pub message: String,
    /// 1-based source line of the program where the error occurred.
    pub line: Option<u32>,
}

fn line_suffix(line: &Option<u32>) -> String {
    line.map(|l| format!(" in line {l}")).unwrap_or_default()
}

impl CoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// What the running program currently expects from the input devices.
///
/// Delivered with [`CoreDelegate::controls_did_change`].  The keyboard layout
/// is fixed, so the shell currently ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlsInfo {
    /// Number of gamepads the program reads.
    pub gamepads: u8,
    /// The program reads touch/pointer input.
    pub touch: bool,
    /// The program reads text from the keyboard.
    pub keyboard: bool,
}

/// One rendered frame of the virtual screen, as 0x00RRGGBB pixels row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u32],
}

/// Input completion calls.
pub trait DeviceInput {
    fn touch_pressed(&mut self, x: i32, y: i32);
    fn touch_dragged(&mut self, x: i32, y: i32);
    fn touch_released(&mut self);
    fn gamepad_pressed(&mut self, pad: PadIndex, button: GamepadButton);
    fn gamepad_released(&mut self, pad: PadIndex, button: GamepadButton);
    /// An uppercased ASCII character typed on the keyboard.
    fn key_pressed(&mut self, key: u8);
    /// Return / Enter.
    fn confirm_pressed(&mut self);
    /// Backspace.
    fn delete_pressed(&mut self);
}

/// Read access to the core's disk contents.
pub trait DiskSnapshot {
    /// Serialises the current disk contents.  The image length is the buffer
    /// length; no terminator is involved.
    fn export_disk(&self) -> VirtualDiskImage;
}

/// The core's removable disk drive.
pub trait DiskDrive: DiskSnapshot {
    /// Replaces the disk contents with `image`.
    ///
    /// `complete` is always `true` from the shell: the image is final, not a
    /// fragment of an incremental load.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] when `image` is not a valid disk.
    fn import_disk(&mut self, image: &[u8], complete: bool) -> Result<(), CoreError>;

    /// Resumes disk operations blocked since the last
    /// [`CoreDelegate::disk_drive_will_access`] that answered `false`.
    fn disk_loaded(&mut self);
}

/// Callbacks from the core into the shell.
///
/// Every callback runs synchronously inside the [`Console::update`] call that
/// triggered it.
pub trait CoreDelegate {
    /// The running program stopped with `error`.
    fn interpreter_did_fail(&mut self, error: CoreError);

    /// The program is about to use the disk.
    ///
    /// Return `true` if the disk is ready now.  Returning `false` makes the
    /// core hold disk operations until [`DiskDrive::disk_loaded`] is called.
    fn disk_drive_will_access(&mut self) -> bool;

    /// The program wrote to its disk; `disk` can be exported and persisted.
    fn disk_drive_did_save(&mut self, disk: &dyn DiskSnapshot);

    /// The program changed which controls it uses.
    fn controls_did_change(&mut self, controls: ControlsInfo);
}

/// A running console core.
pub trait Console: DeviceInput + DiskDrive {
    /// Called once before the first frame with the host's uptime.
    fn will_run_program(&mut self, seconds_since_power_on: u64);

    /// Number of physical gamepads the host provides.
    fn set_num_physical_gamepads(&mut self, count: u8);

    /// Runs exactly one frame, reporting events through `delegate`.
    fn update(&mut self, delegate: &mut dyn CoreDelegate);

    /// The most recently rendered frame.
    fn frame(&self) -> Frame<'_>;
}

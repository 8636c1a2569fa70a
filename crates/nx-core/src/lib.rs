//! # nx-core
//!
//! Shared library for the LowRes NX host shell containing the console
//! contract, the abstract device vocabulary, the physical key table, the
//! screen coordinate mapper, and the disk-mount negotiation types.
//!
//! This crate has zero dependencies on OS APIs, windowing toolkits, the async
//! runtime, or the filesystem.
//!
//! # Architecture overview (for beginners)
//!
//! LowRes NX is a fantasy console: a small virtual machine (the *core*) that
//! runs BASIC programs on a 160×128 screen with two gamepads, a touch pointer
//! and a text keyboard.  The *shell* is the host application around it.  It
//! ticks the core thirty times a second, turns real key presses and mouse
//! clicks into console input, and answers the core when a program wants to use
//! its removable disk.
//!
//! This crate (`nx-core`) is the shared foundation.  It defines:
//!
//! - **`console`** – The traits the core implements (input completions, disk
//!   import/export, one frame of execution) and the delegate trait the shell
//!   implements to receive the core's callbacks.
//!
//! - **`domain`** – Pure data and rules: gamepad buttons and device events,
//!   platform events, the virtual screen transform, disk requests and tokens,
//!   and the fault taxonomy shown to the user.
//!
//! - **`keymap`** – The fixed two-player table that maps physical key codes
//!   onto virtual gamepad buttons, plus the text-key translation rules.

pub mod console;
pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `nx_core::ScreenTransform` instead of `nx_core::domain::screen::ScreenTransform`.
pub use console::{
    Console, ControlsInfo, CoreDelegate, CoreError, DeviceInput, DiskDrive, DiskSnapshot, Frame,
};
pub use domain::device::{DeviceEvent, GamepadButton, PadIndex};
pub use domain::disk::{
    default_disk_path, DiskChoice, DiskRequest, MountError, MountState, RequestToken,
    VirtualDiskImage,
};
pub use domain::fault::{FaultKind, ShellFault};
pub use domain::platform::{PlatformEvent, ViewPoint, ViewSize, WindowSize};
pub use domain::screen::{DisplayFit, ScreenTransform, VirtualPoint, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use keymap::KeyMapper;

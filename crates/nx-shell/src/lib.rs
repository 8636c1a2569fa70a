//! nx-shell library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does nx-shell do? (for beginners)
//!
//! The *shell* is the host program around a LowRes NX console core.  The
//! core runs BASIC programs; the shell gives it a clock, input devices and a
//! disk drive:
//!
//! 1. Ticks the core thirty times a second and hands each frame to a renderer.
//! 2. Turns physical key presses into gamepad buttons or typed characters, and
//!    pointer clicks into touches on the 160×128 virtual screen.
//! 3. When a program first touches its disk, asks the user which disk image to
//!    use, loads it, and tells the core to continue, exactly once per request.
//! 4. When a program saves, writes the disk image back to the chosen file.
//! 5. Shows program errors and disk failures on one error surface.

/// Application layer: use cases and the ports they depend on.
pub mod application;

/// Infrastructure layer: filesystem, chooser, renderer, config, stdin events,
/// and the headless stand-in console.
pub mod infrastructure;

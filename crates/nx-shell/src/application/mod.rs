//! Application layer use cases for the shell.
//!
//! # What use cases does the shell have?
//!
//! - **`translate_input`** – Turns platform key and pointer events into the
//!   core's device events and forwards them immediately.
//!
//! - **`mount_disk`** – The disk-mount broker: opens a request when the core
//!   needs its disk, resolves it when the user answers, and writes the disk
//!   back when the program saves.
//!
//! - **`delegate_bridge`** – The object the core calls back into during a
//!   frame.  Routes faults to the error surface and disk events to the broker.
//!
//! - **`session`** – Owns the core for the lifetime of one window and ties the
//!   pieces above together.
//!
//! - **`scheduler`** – The fixed-rate loop that ticks the session and feeds it
//!   platform events and chooser answers.

pub mod delegate_bridge;
pub mod error_surface;
pub mod mount_disk;
pub mod scheduler;
pub mod session;
pub mod translate_input;

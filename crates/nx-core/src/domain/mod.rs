//! Domain entities for the LowRes NX host shell.
//!
//! This module contains pure rules and data with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the shell.  Domain code has **no** imports from OS
//! APIs, the async runtime, the filesystem, or a windowing toolkit, so it can
//! be compiled and tested on any platform without any external setup.
//!
//! Outer layers (the application use cases and the infrastructure adapters in
//! `nx-shell`) depend on these types, but the domain never depends on them.

/// Virtual gamepads and the abstract device events sent to the core.
pub mod device;

/// Disk requests, request tokens and the mount state machine's states.
pub mod disk;

/// Faults presented to the user.
pub mod fault;

/// Raw host platform events (keys, pointer, resize, close).
pub mod platform;

/// Window pixels to virtual screen mapping and integer display scale.
pub mod screen;

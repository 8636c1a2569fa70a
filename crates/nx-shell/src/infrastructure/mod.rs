//! Infrastructure layer for the shell.
//!
//! Contains the adapters behind the application layer's traits: the
//! filesystem, the disk chooser, output surfaces, configuration, platform
//! input, and the console cores the binary can run.
//!
//! **Dependency rule**: this layer may depend on `application` and `nx_core`,
//! but MUST NOT be imported by the domain layer.
//!
//! # Sub-modules
//!
//! - **`chooser`** – `SpawningPrompter` runs a `DiskChooser` in its own task
//!   and reports the answer back to the scheduler; `PresetDiskChooser` answers
//!   from the command line.
//!
//! - **`config`** – TOML settings loaded at startup.
//!
//! - **`console`** – The headless stand-in core and a recording test core.
//!
//! - **`platform_input`** – Parses platform events from stdin lines.
//!
//! - **`storage`** – Whole-file reads and writes of disk images.
//!
//! - **`surface`** – Error presentation and frame output via `tracing`.
//!
//! Each module with a trait implementation also has a `mock` sub-module with
//! a recording double for tests.

pub mod chooser;
pub mod config;
pub mod console;
pub mod platform_input;
pub mod storage;
pub mod surface;

//! Console core implementations available to the shell.
//!
//! - **`headless`** – A stand-in core used by the `nx-shell` binary when no
//!   interpreter is linked in.
//! - **`mock`** – A recording, scriptable core for tests.

pub mod headless;
pub mod mock;

pub use headless::{HeadlessConsole, HeadlessOptions};

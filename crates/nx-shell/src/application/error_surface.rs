//! The single user-visible channel for faults.

use nx_core::ShellFault;

/// Presents faults to the user.
///
/// There is no structured recovery: the user acknowledges and dismisses.
/// Infrastructure implementations log or show a dialog; test implementations
/// record calls.
pub trait ErrorSurface: Send + Sync {
    fn present_error(&self, fault: &ShellFault);
}

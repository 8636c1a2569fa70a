//! Faults shown to the user through the shell's error surface.
//!
//! | Fault            | Cause                                   | Policy                          |
//! |------------------|-----------------------------------------|---------------------------------|
//! | `Execution`      | the core stopped the program            | terminal for the run, no retry  |
//! | `DiskRead`       | the chosen disk file could not be read  | fail-open, disk still "loaded"  |
//! | `DiskImport`     | the bytes are not a valid disk image    | fail-open, disk still "loaded"  |
//! | `DiskWrite`      | a saved disk could not be written back  | reported once, no retry         |

use std::path::PathBuf;

use thiserror::Error;

use crate::console::CoreError;

/// Discriminant of a [`ShellFault`], handy for assertions and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Execution,
    DiskRead,
    DiskWrite,
    DiskImport,
}

/// A fault presented to the user.
#[derive(Debug, Error)]
pub enum ShellFault {
    /// The core detected an error while running the program.
    #[error("program stopped: {0}")]
    Execution(CoreError),

    /// The disk image file could not be read.
    #[error("could not read disk {path}: {source}")]
    DiskRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The saved disk could not be written back to its file.
    #[error("could not write disk {path}: {source}")]
    DiskWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but the core rejected its contents.
    #[error("{path} is not a valid disk: {source}")]
    DiskImport {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

impl ShellFault {
    pub fn kind(&self) -> FaultKind {
        match self {
            ShellFault::Execution(_) => FaultKind::Execution,
            ShellFault::DiskRead { .. } => FaultKind::DiskRead,
            ShellFault::DiskWrite { .. } => FaultKind::DiskWrite,
            ShellFault::DiskImport { .. } => FaultKind::DiskImport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let read = ShellFault::DiskRead {
            path: "/x/disk.nx".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(read.kind(), FaultKind::DiskRead);
        assert_eq!(
            ShellFault::Execution(CoreError::new("Syntax error")).kind(),
            FaultKind::Execution
        );
    }

    #[test]
    fn test_display_names_the_disk_path() {
        let fault = ShellFault::DiskImport {
            path: "/x/disk.nx".into(),
            source: CoreError::new("Invalid disk format"),
        };
        assert_eq!(fault.to_string(), "/x/disk.nx is not a valid disk: Invalid disk format");
    }
}

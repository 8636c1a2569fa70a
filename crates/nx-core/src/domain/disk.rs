//! Disk-mount negotiation types.
//!
//! When a running program first touches its removable disk, the core asks the
//! shell for one.  The shell answers "not yet", asks the user out of band,
//! reads the chosen file, imports it, and finally tells the core the disk is
//! loaded.  A [`DiskRequest`] tracks one such negotiation from the moment it
//! opens until it resolves.
//!
//! ```text
//!  Idle ──will-access──▶ AwaitingChoice ──choice──▶ Importing ──▶ Resolved
//!   ▲                                                              │
//!   └──────────────────────── request dropped ─────────────────────┘
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Identity of one disk request.
///
/// Every response from the user's chooser carries the token of the request it
/// answers, so a late answer for a request that no longer exists is
/// recognisable and can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(Uuid);

impl RequestToken {
    /// Creates a fresh random token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a mount negotiation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// No request is open.
    Idle,
    /// The user is being asked which disk image to use.
    AwaitingChoice,
    /// A path is known and its bytes are being read and imported.
    Importing,
    /// The core has been told the disk is loaded.
    Resolved,
}

/// The user's answer to the disk chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskChoice {
    /// The user picked this file.
    Explicit(PathBuf),
    /// The user cancelled; the default disk next to the program is used.
    Declined,
}

/// Protocol violations detected by the mount broker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// A new request was signalled while another is still unresolved.
    #[error("disk request {pending} is still unresolved")]
    Busy { pending: RequestToken },

    /// A response arrived for a request that is not the pending one.
    #[error("discarding response for stale disk request {received}")]
    StaleToken { received: RequestToken },
}

/// One pending mount negotiation.
#[derive(Debug)]
pub struct DiskRequest {
    token: RequestToken,
    state: MountState,
    path: Option<PathBuf>,
}

impl DiskRequest {
    /// Opens a request in `AwaitingChoice` with a fresh token.
    pub fn open() -> Self {
        Self {
            token: RequestToken::new(),
            state: MountState::AwaitingChoice,
            path: None,
        }
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Applies the user's choice and moves to `Importing`.
    ///
    /// A declined choice falls back to `default_path`, so a path is always
    /// determined.
    pub fn choose(&mut self, choice: DiskChoice, default_path: &Path) -> &Path {
        let path = match choice {
            DiskChoice::Explicit(path) => path,
            DiskChoice::Declined => default_path.to_path_buf(),
        };
        self.state = MountState::Importing;
        self.path.insert(path)
    }

    /// Finishes the request, consuming it.  Returns the path it resolved to.
    pub fn resolve(mut self) -> Option<PathBuf> {
        self.state = MountState::Resolved;
        self.path.take()
    }
}

/// The default disk for a program: `disk.<extension>` in the program's folder.
pub fn default_disk_path(program: &Path, extension: &str) -> PathBuf {
    let dir = program.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("disk.{extension}"))
}

/// Raw disk image bytes exchanged verbatim with the core.
///
/// The length is the length of the buffer; the contents are never scanned,
/// so images containing zero bytes survive intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualDiskImage(Vec<u8>);

impl VirtualDiskImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for VirtualDiskImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! DiskMountBroker: resolves the core's asynchronous disk requests.
//!
//! This is the protocol core of the shell.  The broker never blocks: when the
//! core signals it needs its disk, [`DiskMountBroker::begin`] opens a request
//! and the core is told "not yet".  The user's answer arrives later as a
//! [`ChoiceResponse`]; [`DiskMountBroker::resolve`] then runs the whole
//! `AwaitingChoice → Importing → Resolved` transition in one call and returns a
//! [`MountOutcome`].  Resuming the core is the *only* thing an outcome can do,
//! and doing it consumes the outcome, so every request resumes the core
//! exactly once.
//!
//! # Fail-open policy
//!
//! A disk that cannot be read or imported is reported on the error surface,
//! but the core is still resumed.  A failed mount must never leave the
//! program hanging; later disk operations fail inside the core instead.
//!
//! # Architecture
//!
//! The broker depends only on traits (`DiskStorage`, `ErrorSurface`,
//! `DiskDrive`) and domain types.  All infrastructure implementations are
//! injected at construction time, making it fully unit-testable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nx_core::{
    default_disk_path, DiskChoice, DiskDrive, DiskRequest, DiskSnapshot, MountError, MountState,
    RequestToken, ShellFault,
};
use tracing::{debug, info, warn};

use super::error_surface::ErrorSurface;

/// Title of the chooser's confirm button.
pub const CHOOSER_PROMPT: &str = "Use as Disk";

/// Byte-level access to disk image files.
///
/// Infrastructure implementations use the filesystem; tests use mocks.
#[cfg_attr(test, mockall::automock)]
pub trait DiskStorage: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Replaces the file at `path` with `bytes`.
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// What the chooser shows the user for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRequest {
    /// Token of the request; the answer must carry it back.
    pub token: RequestToken,
    /// Label of the confirm button.
    pub prompt: &'static str,
    /// Only files with this extension can be picked.
    pub extension: String,
    /// The disk used when the user cancels.
    pub default_path: PathBuf,
}

/// The user's answer to a [`ChooserRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResponse {
    pub token: RequestToken,
    pub choice: DiskChoice,
}

/// Opens the disk chooser for a request without waiting for the answer.
///
/// The answer is delivered later as a [`ChoiceResponse`] through whatever
/// channel the implementation was built with.
pub trait ChoicePrompter: Send + Sync {
    fn prompt(&self, request: ChooserRequest);
}

/// How the import step of a resolved request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountResult {
    /// The image was read and imported.
    Mounted { bytes: usize },
    /// The file could not be read; nothing was imported.
    ReadFailed,
    /// The core rejected the image.
    ImportFailed,
}

/// A resolved request waiting to resume the core.
#[must_use = "the core stays blocked until the outcome is resumed"]
#[derive(Debug)]
pub struct MountOutcome {
    token: RequestToken,
    path: PathBuf,
    result: MountResult,
}

impl MountOutcome {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn result(&self) -> MountResult {
        self.result
    }

    /// Sends the "disk loaded" completion to the core, consuming the outcome.
    pub fn resume(self, drive: &mut dyn DiskDrive) -> MountReport {
        drive.disk_loaded();
        debug!(token = %self.token, "disk loaded; core resumed");
        MountReport {
            token: self.token,
            path: self.path,
            result: self.result,
        }
    }
}

/// Record of a finished negotiation, after the core was resumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountReport {
    pub token: RequestToken,
    pub path: PathBuf,
    pub result: MountResult,
}

/// Result of persisting a saved disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No disk path was ever resolved this session; nothing was written.
    NoDisk,
    /// The disk was written.
    Written { path: PathBuf, bytes: usize },
    /// The write failed and was reported.
    Failed { path: PathBuf },
}

/// The disk-mount broker.
pub struct DiskMountBroker {
    storage: Arc<dyn DiskStorage>,
    errors: Arc<dyn ErrorSurface>,
    default_path: PathBuf,
    extension: String,
    pending: Option<DiskRequest>,
    disk_path: Option<PathBuf>,
}

impl DiskMountBroker {
    /// Creates a broker for the program at `program`.
    ///
    /// `extension` is the disk file extension; the default disk is
    /// `disk.<extension>` next to the program.
    pub fn new(
        storage: Arc<dyn DiskStorage>,
        errors: Arc<dyn ErrorSurface>,
        program: &Path,
        extension: &str,
    ) -> Self {
        Self {
            storage,
            errors,
            default_path: default_disk_path(program, extension),
            extension: extension.to_string(),
            pending: None,
            disk_path: None,
        }
    }

    /// The state of the current negotiation, `Idle` when none is open.
    pub fn state(&self) -> MountState {
        self.pending
            .as_ref()
            .map_or(MountState::Idle, DiskRequest::state)
    }

    /// Token of the open request, if any.
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending.as_ref().map(DiskRequest::token)
    }

    /// The disk file resolved by the latest mount in this session.
    pub fn disk_path(&self) -> Option<&Path> {
        self.disk_path.as_deref()
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Opens a request (`Idle → AwaitingChoice`).
    ///
    /// # Errors
    ///
    /// Returns [`MountError::Busy`] while another request is unresolved; the
    /// negotiation is modal and requests are never interleaved.
    pub fn begin(&mut self) -> Result<ChooserRequest, MountError> {
        if let Some(pending) = &self.pending {
            return Err(MountError::Busy {
                pending: pending.token(),
            });
        }
        let request = DiskRequest::open();
        let token = request.token();
        self.pending = Some(request);
        info!(%token, "disk requested; awaiting user choice");
        Ok(ChooserRequest {
            token,
            prompt: CHOOSER_PROMPT,
            extension: self.extension.clone(),
            default_path: self.default_path.clone(),
        })
    }

    /// Resolves the open request with the user's answer.
    ///
    /// Determines the path, reads it, and imports it into `drive` as a
    /// complete image.  Read and import failures are presented on the error
    /// surface and still produce an outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::StaleToken`] when `response` does not answer the
    /// open request.  The pending request, if any, is left untouched and the
    /// core is not resumed.
    pub fn resolve(
        &mut self,
        response: ChoiceResponse,
        drive: &mut dyn DiskDrive,
    ) -> Result<MountOutcome, MountError> {
        let stale = MountError::StaleToken {
            received: response.token,
        };
        let mut request = match self.pending.take() {
            Some(request) if request.token() == response.token => request,
            other => {
                self.pending = other;
                return Err(stale);
            }
        };

        let path = request
            .choose(response.choice, &self.default_path)
            .to_path_buf();
        debug!(token = %response.token, path = %path.display(), "importing disk");

        let result = match self.storage.read(&path) {
            Err(source) => {
                warn!(path = %path.display(), "disk read failed: {source}");
                self.errors
                    .present_error(&ShellFault::DiskRead { path: path.clone(), source });
                MountResult::ReadFailed
            }
            Ok(bytes) => match drive.import_disk(&bytes, true) {
                Ok(()) => MountResult::Mounted { bytes: bytes.len() },
                Err(source) => {
                    warn!(path = %path.display(), "disk import failed: {source}");
                    self.errors
                        .present_error(&ShellFault::DiskImport { path: path.clone(), source });
                    MountResult::ImportFailed
                }
            },
        };

        self.disk_path = request.resolve();
        info!(token = %response.token, ?result, "disk request resolved");
        Ok(MountOutcome {
            token: response.token,
            path,
            result,
        })
    }

    /// Persists the core's disk after the program saved.
    ///
    /// Without a resolved disk path this is a no-op: nothing is exported or
    /// written and no fault is raised.  A write failure is reported once and
    /// not retried; the core's in-memory disk is unaffected either way.
    pub fn export(&self, disk: &dyn DiskSnapshot) -> ExportOutcome {
        let Some(path) = &self.disk_path else {
            debug!("disk saved but no disk file chosen yet; skipping write");
            return ExportOutcome::NoDisk;
        };

        let image = disk.export_disk();
        match self.storage.write(path, image.as_bytes()) {
            Ok(()) => {
                info!(path = %path.display(), bytes = image.len(), "disk written");
                ExportOutcome::Written {
                    path: path.clone(),
                    bytes: image.len(),
                }
            }
            Err(source) => {
                warn!(path = %path.display(), "disk write failed: {source}");
                self.errors
                    .present_error(&ShellFault::DiskWrite { path: path.clone(), source });
                ExportOutcome::Failed { path: path.clone() }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

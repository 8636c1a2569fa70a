//! In-memory disk storage for tests.
//!
//! Files live in a `Mutex<HashMap<..>>`; every successful write is also
//! appended to `writes` so tests can assert exactly what was persisted and in
//! what order.  Set `should_fail_writes` to simulate a read-only volume.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::mount_disk::DiskStorage;

/// A [`DiskStorage`] that never touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryDiskStorage {
    /// Current contents of each known file.
    pub files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    /// Every `(path, bytes)` pair written, in call order.
    pub writes: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    /// When `true`, `write` fails with `PermissionDenied`.
    pub should_fail_writes: bool,
}

impl MemoryDiskStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage whose writes always fail.
    pub fn read_only() -> Self {
        Self {
            should_fail_writes: true,
            ..Self::default()
        }
    }

    /// Places a file in the store.
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.into(), bytes);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl DiskStorage for MemoryDiskStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such disk file"))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if self.should_fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), bytes.to_vec());
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

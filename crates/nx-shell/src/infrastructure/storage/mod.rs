//! Filesystem access to disk image files.
//!
//! Disk images are read and written whole.  The bytes are passed through
//! untouched: their length is the file's length, and zero bytes inside an
//! image are data like any other.

pub mod mock;

use std::path::Path;

use tracing::trace;

use crate::application::mount_disk::DiskStorage;

/// [`DiskStorage`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDiskStorage;

impl FsDiskStorage {
    pub fn new() -> Self {
        Self
    }
}

impl DiskStorage for FsDiskStorage {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let bytes = std::fs::read(path)?;
        trace!(path = %path.display(), len = bytes.len(), "disk file read");
        Ok(bytes)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)?;
        trace!(path = %path.display(), len = bytes.len(), "disk file written");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// A scratch directory unique to one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nx-shell-{name}-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn test_write_then_read_preserves_embedded_zero_bytes() {
        // Arrange
        let dir = scratch_dir("zeros");
        let path = dir.join("disk.nx");
        let storage = FsDiskStorage::new();
        let image = [b'N', b'X', 0, 0, b'!', 0];

        // Act
        storage.write(&path, &image).expect("write");
        let read = storage.read(&path).expect("read");

        // Assert
        assert_eq!(read, image);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = FsDiskStorage::new().read(&dir.join("disk.nx")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let dir = scratch_dir("replace");
        let path = dir.join("disk.nx");
        let storage = FsDiskStorage::new();

        storage.write(&path, b"a much longer first image").unwrap();
        storage.write(&path, b"short").unwrap();

        assert_eq!(storage.read(&path).unwrap(), b"short");
        let _ = std::fs::remove_dir_all(dir);
    }
}

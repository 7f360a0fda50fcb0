//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a text file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with arbitrary bytes, creating parent directories as needed.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an (empty) directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Remove all permissions from `path`.
    ///
    /// Returns `None` when the process can still read the directory afterwards
    /// (e.g. running as root), in which case permissions are restored and the
    /// caller should skip its permission assertions.
    #[cfg(unix)]
    pub fn lock(&self, path: impl Into<PathBuf>) -> Option<PermissionGuard> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.into();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000))
            .expect("Failed to set permissions");
        let guard = PermissionGuard { path };
        if fs::read_dir(&guard.path).is_ok() {
            return None;
        }
        Some(guard)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores read/write/execute permissions on drop so the tree can be removed.
#[cfg(unix)]
pub struct PermissionGuard {
    path: PathBuf,
}

#[cfg(unix)]
impl Drop for PermissionGuard {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o755));
    }
}

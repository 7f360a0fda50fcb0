//! Entries discovered during traversal

use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

/// What kind of filesystem object an entry is.
///
/// Symlinks are classified by their target. `Other` covers sockets, FIFOs
/// and devices: listed like files, never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A node yielded by the walker. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    symlink: bool,
}

impl FsEntry {
    /// Entry whose path is just its name.
    #[cfg(test)]
    pub(crate) fn new(name: &str, kind: EntryKind) -> Self {
        Self {
            path: PathBuf::from(name),
            name: name.to_string(),
            kind,
            symlink: false,
        }
    }

    /// Build an entry from a directory listing item.
    pub fn from_dir_entry(entry: &DirEntry) -> io::Result<Self> {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type()?;
        Ok(Self::classify(path, name, file_type))
    }

    /// Build an entry for an arbitrary path, displayed as `name`.
    pub fn from_path(path: &Path, name: &str) -> io::Result<Self> {
        let file_type = fs::symlink_metadata(path)?.file_type();
        Ok(Self::classify(path.to_path_buf(), name.to_string(), file_type))
    }

    fn classify(path: PathBuf, name: String, file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            // Dangling links stay files; reading them fails later.
            let kind = fs::metadata(&path)
                .map(|meta| EntryKind::from_file_type(meta.file_type()))
                .unwrap_or(EntryKind::File);
            return Self {
                path,
                name,
                kind,
                symlink: true,
            };
        }
        Self {
            path,
            name,
            kind: EntryKind::from_file_type(file_type),
            symlink: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// Directories reached through a symlink are listed but never entered.
    pub fn is_descendable(&self) -> bool {
        self.is_dir() && !self.symlink
    }

    pub(crate) fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

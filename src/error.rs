//! Error types shared by the walker, the renderers and the CLI

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot access '{}': No such file or directory", path.display())]
    MissingRoot { path: PathBuf },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8: {source}", path.display())]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("error writing output: {0}")]
    Write(#[source] io::Error),

    #[error("invalid config '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl Error {
    /// True for listing failures caused by missing permissions.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::ReadDir { source, .. } | Error::ReadFile { source, .. } => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_message_names_path() {
        let err = Error::MissingRoot {
            path: PathBuf::from("daemon"),
        };
        assert_eq!(
            err.to_string(),
            "cannot access 'daemon': No such file or directory"
        );
    }

    #[test]
    fn test_permission_denied_detection() {
        let denied = Error::ReadDir {
            path: PathBuf::from("secret"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let missing = Error::ReadDir {
            path: PathBuf::from("gone"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(denied.is_permission_denied());
        assert!(!missing.is_permission_denied());
    }
}

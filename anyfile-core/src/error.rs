// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for anyfile

use std::io;
use thiserror::Error;

use crate::path::EntryPath;

/// Result type alias
pub type FsResult<T> = Result<T, FsError>;

/// Main error type
///
/// Every variant names the path the failing operation was working on.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(EntryPath),

    #[error("Permission denied: {0}")]
    AccessDenied(EntryPath),

    #[error("Already exists: {0}")]
    AlreadyExists(EntryPath),

    #[error("Directory not empty: {0}")]
    NotEmpty(EntryPath),

    #[error("Unsupported operation on {path}: {source}")]
    Unsupported {
        path: EntryPath,
        #[source]
        source: io::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: EntryPath,
        #[source]
        source: io::Error,
    },

    #[error("Path changed during {operation}: {path}")]
    Race {
        path: EntryPath,
        operation: &'static str,
    },

    #[error("No entry kind matched: {0}")]
    Unclassifiable(EntryPath),

    #[error("Invalid open mode: {0:?}")]
    InvalidOpenMode(String),
}

impl FsError {
    /// Map an OS error onto the taxonomy, attaching the path it concerns.
    pub fn from_io(err: io::Error, path: &EntryPath) -> Self {
        let path = path.clone();

        #[cfg(unix)]
        match err.raw_os_error() {
            Some(libc::ENOTEMPTY) => return FsError::NotEmpty(path),
            Some(libc::EXDEV) => return FsError::Unsupported { path, source: err },
            _ => {}
        }

        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsError::AccessDenied(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            io::ErrorKind::Unsupported => FsError::Unsupported { path, source: err },
            _ => FsError::Io { path, source: err },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    /// True when a multi-step operation lost its target to a concurrent change.
    pub fn is_race(&self) -> bool {
        matches!(self, FsError::Race { .. })
    }

    /// The path the failing operation was working on, if any.
    pub fn path(&self) -> Option<&EntryPath> {
        match self {
            FsError::NotFound(path)
            | FsError::AccessDenied(path)
            | FsError::AlreadyExists(path)
            | FsError::NotEmpty(path)
            | FsError::Unclassifiable(path)
            | FsError::Unsupported { path, .. }
            | FsError::Io { path, .. }
            | FsError::Race { path, .. } => Some(path),
            FsError::InvalidOpenMode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> EntryPath {
        EntryPath::new("/tmp/thing")
    }

    #[test]
    fn test_from_io_kinds() {
        let err = FsError::from_io(io::Error::from(io::ErrorKind::NotFound), &path());
        assert!(err.is_not_found());

        let err = FsError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), &path());
        assert!(matches!(err, FsError::AccessDenied(_)));

        let err = FsError::from_io(io::Error::from(io::ErrorKind::AlreadyExists), &path());
        assert!(matches!(err, FsError::AlreadyExists(_)));

        let err = FsError::from_io(io::Error::from(io::ErrorKind::Other), &path());
        assert!(matches!(err, FsError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_from_raw_os_codes() {
        let err = FsError::from_io(io::Error::from_raw_os_error(libc::ENOTEMPTY), &path());
        assert!(matches!(err, FsError::NotEmpty(_)));

        let err = FsError::from_io(io::Error::from_raw_os_error(libc::EXDEV), &path());
        assert!(matches!(err, FsError::Unsupported { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = FsError::NotFound(path());
        assert_eq!(format!("{}", err), "Path not found: /tmp/thing");

        let err = FsError::Race { path: path(), operation: "classify" };
        assert_eq!(format!("{}", err), "Path changed during classify: /tmp/thing");
        assert!(err.is_race());
    }

    #[test]
    fn test_path_accessor() {
        assert_eq!(FsError::NotEmpty(path()).path(), Some(&path()));
        assert!(FsError::InvalidOpenMode("q".into()).path().is_none());
    }
}

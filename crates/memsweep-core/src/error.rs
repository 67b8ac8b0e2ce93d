//! Error types for enumeration and archival.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while enumerating a memory subtree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path not found.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// True when the error means the memory subtree is simply absent.
    ///
    /// Callers map this case to an empty-state report rather than a
    /// failure.
    pub fn is_missing_root(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotADirectory { .. })
    }
}

/// Kind of non-fatal warning collected during enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Error reading a directory entry.
    ReadError,
    /// Error reading file metadata.
    MetadataError,
}

/// Non-fatal warning encountered during enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Hard failures during archival.
///
/// Any of these aborts the remaining moves for the workspace; a vanished
/// source is tolerated and never reaches this type.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Could not create an intermediate archive directory.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination path is already occupied.
    #[error("archive destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// The move itself failed.
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io_kind_mapping() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
    }

    #[test]
    fn test_missing_root_predicate() {
        let missing = ScanError::NotFound {
            path: PathBuf::from("/ws/memory"),
        };
        let not_dir = ScanError::NotADirectory {
            path: PathBuf::from("/ws/memory"),
        };
        let denied = ScanError::PermissionDenied {
            path: PathBuf::from("/ws/memory"),
        };
        assert!(missing.is_missing_root());
        assert!(not_dir.is_missing_root());
        assert!(!denied.is_missing_root());
    }
}

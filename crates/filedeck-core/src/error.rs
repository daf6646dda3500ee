//! Error types for file operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::ConflictKind;

/// Result alias used throughout filedeck.
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Errors that can occur while executing a file operation.
#[derive(Debug, Error)]
pub enum FileOpError {
    /// The selected or remembered entry no longer exists.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// The target name is already taken or otherwise clashes with the source.
    #[error("{kind}: {path}")]
    Conflict { path: PathBuf, kind: ConflictKind },

    /// Directory deletion requires the directory to be empty.
    #[error("Directory is not empty: {path}")]
    NonEmptyDirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// A directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A user-supplied name was rejected before touching the file system.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The copy half of a move succeeded but the original could not be removed.
    ///
    /// Both entries exist afterwards.
    #[error("Moved {from} to {to}, but the original could not be removed: {cause}")]
    MoveIncomplete {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Another operation is still running.
    #[error("Another operation is in progress")]
    Busy,

    /// The background worker lost its session.
    #[error("The operation worker stopped unexpectedly")]
    WorkerStopped,

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileOpError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            ErrorKind::AlreadyExists => Self::Conflict {
                kind: if path.is_dir() {
                    ConflictKind::DirectoryExists
                } else {
                    ConflictKind::FileExists
                },
                path,
            },
            ErrorKind::DirectoryNotEmpty => Self::NonEmptyDirectory { path },
            ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a conflict error.
    pub fn conflict(path: impl Into<PathBuf>, kind: ConflictKind) -> Self {
        Self::Conflict {
            path: path.into(),
            kind,
        }
    }

    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

//! Reports for completed operations.

use std::path::{Path, PathBuf};

/// The type of operation that was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Copy,
    Move,
    Delete,
    Rename,
    CreateDirectory,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "Copy"),
            Self::Move => write!(f, "Move"),
            Self::Delete => write!(f, "Delete"),
            Self::Rename => write!(f, "Rename"),
            Self::CreateDirectory => write!(f, "Create directory"),
        }
    }
}

/// Result of a successfully completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationComplete {
    /// The type of operation.
    pub operation_type: OperationType,
    /// The entry that was operated on.
    pub source: PathBuf,
    /// Where the entry ended up, for operations that produce one.
    pub destination: Option<PathBuf>,
    /// Total bytes copied, moved or removed.
    pub bytes_processed: u64,
}

impl OperationComplete {
    /// Create a new completion report.
    pub fn new(
        operation_type: OperationType,
        source: impl Into<PathBuf>,
        destination: Option<PathBuf>,
        bytes_processed: u64,
    ) -> Self {
        Self {
            operation_type,
            source: source.into(),
            destination,
            bytes_processed,
        }
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let name = display_name(&self.source);
        let target = self.destination.as_deref().map(display_name);

        match (self.operation_type, target) {
            (OperationType::Copy, Some(t)) if t != name => format!("Copied '{name}' as '{t}'"),
            (OperationType::Copy, _) => format!("Copied '{name}'"),
            (OperationType::Move, Some(t)) if t != name => format!("Moved '{name}' as '{t}'"),
            (OperationType::Move, _) => format!("Moved '{name}'"),
            (OperationType::Delete, _) => format!("Deleted '{name}'"),
            (OperationType::Rename, Some(t)) => format!("Renamed '{name}' to '{t}'"),
            (OperationType::Rename, None) => format!("Renamed '{name}'"),
            (OperationType::CreateDirectory, _) => format!("Created directory '{name}'"),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

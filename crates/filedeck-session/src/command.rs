//! Commands accepted by the controller and their outcomes.

use std::path::PathBuf;

use filedeck_ops::OperationComplete;

use crate::ClipboardMode;

/// A discrete user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Browse another directory (relative paths resolve against the current one).
    ChangeDirectory(PathBuf),
    /// Select an entry of the current listing by name.
    Select(String),
    /// Drop the selection.
    ClearSelection,
    /// Remember the selection for a later paste.
    MarkForCopy,
    /// Remember the selection for a later move.
    MarkForCut,
    /// Copy the clipboard entry into the current directory.
    Paste,
    /// Move the clipboard entry into the current directory.
    Move,
    /// Delete the selection.
    Delete,
    /// Rename the selection.
    Rename(String),
    /// Create a folder in the current directory.
    CreateFolder(String),
    /// Re-read the current directory.
    Refresh,
}

impl Command {
    /// Check if this command can change what is on disk.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Paste | Self::Move | Self::Delete | Self::Rename(_) | Self::CreateFolder(_)
        )
    }
}

/// What a successfully handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The current directory changed.
    Navigated { dir: PathBuf },
    /// An entry was selected.
    Selected { path: PathBuf },
    /// The selection was dropped.
    SelectionCleared,
    /// An entry was placed on the clipboard.
    Marked { mode: ClipboardMode, path: PathBuf },
    /// A file-system operation completed.
    Completed(OperationComplete),
    /// The listing was re-read.
    Refreshed { entries: usize },
    /// Nothing to do, e.g. no selection or an empty clipboard.
    Unchanged { reason: &'static str },
}

impl CommandOutcome {
    /// Human-readable notification text.
    pub fn message(&self) -> String {
        match self {
            Self::Navigated { dir } => format!("Now in {}", dir.display()),
            Self::Selected { path } => format!("Selected '{}'", file_name(path)),
            Self::SelectionCleared => "Selection cleared".to_string(),
            Self::Marked { mode, path } => {
                let verb = match mode {
                    ClipboardMode::Cut => "Cut",
                    _ => "Copied",
                };
                format!("{verb} '{}' to clipboard", file_name(path))
            }
            Self::Completed(report) => report.summary(),
            Self::Refreshed { entries } => format!("{entries} entries"),
            Self::Unchanged { reason } => reason.to_string(),
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

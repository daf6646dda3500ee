//! Clipboard holding the entry remembered between copy/cut and paste/move.

use std::path::{Path, PathBuf};

/// Clipboard mode determines what a move does with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    /// Clipboard is empty.
    #[default]
    Empty,
    /// Entry was copied; the original is never removed.
    Copy,
    /// Entry was cut; a move removes the original.
    Cut,
}

impl std::fmt::Display for ClipboardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Copy => write!(f, "copy"),
            Self::Cut => write!(f, "cut"),
        }
    }
}

/// Single-entry clipboard tagged with its mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    entry: Option<PathBuf>,
    mode: ClipboardMode,
}

impl Clipboard {
    /// Remember an entry for copying.
    pub fn copy(&mut self, path: impl Into<PathBuf>) {
        self.entry = Some(path.into());
        self.mode = ClipboardMode::Copy;
    }

    /// Remember an entry for moving.
    pub fn cut(&mut self, path: impl Into<PathBuf>) {
        self.entry = Some(path.into());
        self.mode = ClipboardMode::Cut;
    }

    /// Clear the clipboard.
    pub fn clear(&mut self) {
        self.entry = None;
        self.mode = ClipboardMode::Empty;
    }

    /// Point the clipboard at `to` if it currently holds `from`.
    pub fn retarget(&mut self, from: &Path, to: &Path) {
        if self.entry.as_deref() == Some(from) {
            self.entry = Some(to.to_path_buf());
        }
    }

    /// The remembered entry, if any.
    pub fn entry(&self) -> Option<&Path> {
        self.entry.as_deref()
    }

    /// The clipboard mode.
    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    /// Check if the clipboard is empty.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

//! Snapshot of a directory's contents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Entry;

/// The entries of one directory, in the order the OS returned them.
///
/// A listing is a snapshot: it is replaced wholesale after every mutating
/// operation rather than patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Directory that was listed.
    pub dir: PathBuf,
    /// Entries found in the directory.
    pub entries: Vec<Entry>,
}

impl DirectoryListing {
    /// Create a listing from already collected entries.
    pub fn new(dir: impl Into<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            dir: dir.into(),
            entries,
        }
    }

    /// Create an empty listing for a directory.
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Vec::new())
    }

    /// Find an entry by name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check whether an entry with the given path is present.
    pub fn contains_path(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entry names, in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory had no (visible) entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! The file-system collaborator seam.

use std::path::Path;

use filedeck_core::{ConflictResolution, Entry, FileOpResult};

use crate::report::OperationComplete;

/// The file-system primitives the controller is built on.
///
/// Each method is a single request/response call; none of them keeps state
/// between calls.
pub trait FileSystem {
    /// List the entries of a directory.
    fn list_entries(&self, dir: &Path, show_hidden: bool) -> FileOpResult<Vec<Entry>>;

    /// Copy an entry into a directory.
    fn copy_entry(
        &self,
        source: &Path,
        dest_dir: &Path,
        resolution: ConflictResolution,
    ) -> FileOpResult<OperationComplete>;

    /// Move an entry into a directory.
    fn move_entry(
        &self,
        source: &Path,
        dest_dir: &Path,
        resolution: ConflictResolution,
    ) -> FileOpResult<OperationComplete>;

    /// Delete a file or an empty directory.
    fn delete_entry(&self, path: &Path) -> FileOpResult<OperationComplete>;

    /// Rename an entry within its parent directory.
    fn rename_entry(&self, path: &Path, new_name: &str) -> FileOpResult<OperationComplete>;

    /// Create a subdirectory.
    fn create_directory(&self, parent: &Path, name: &str) -> FileOpResult<OperationComplete>;
}

/// [`FileSystem`] backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new host file system handle.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn list_entries(&self, dir: &Path, show_hidden: bool) -> FileOpResult<Vec<Entry>> {
        crate::listing::list_entries(dir, show_hidden)
    }

    fn copy_entry(
        &self,
        source: &Path,
        dest_dir: &Path,
        resolution: ConflictResolution,
    ) -> FileOpResult<OperationComplete> {
        crate::copy::copy_entry(source, dest_dir, resolution)
    }

    fn move_entry(
        &self,
        source: &Path,
        dest_dir: &Path,
        resolution: ConflictResolution,
    ) -> FileOpResult<OperationComplete> {
        crate::move_op::move_entry(source, dest_dir, resolution)
    }

    fn delete_entry(&self, path: &Path) -> FileOpResult<OperationComplete> {
        crate::delete::delete_entry(path)
    }

    fn rename_entry(&self, path: &Path, new_name: &str) -> FileOpResult<OperationComplete> {
        crate::rename::rename_entry(path, new_name)
    }

    fn create_directory(&self, parent: &Path, name: &str) -> FileOpResult<OperationComplete> {
        crate::create::create_directory(parent, name)
    }
}

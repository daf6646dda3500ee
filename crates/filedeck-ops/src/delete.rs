//! Delete operation.

use std::fs;
use std::path::Path;

use filedeck_core::{FileOpError, FileOpResult};

use crate::report::{OperationComplete, OperationType};

/// Permanently remove a file, symlink or empty directory.
///
/// Non-empty directories are refused with
/// [`FileOpError::NonEmptyDirectory`] and left untouched.
pub fn delete_entry(path: &Path) -> FileOpResult<OperationComplete> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FileOpError::io(path, e))?;

    let bytes = if metadata.is_dir() {
        let mut children = fs::read_dir(path).map_err(|e| FileOpError::io(path, e))?;
        if children.next().is_some() {
            return Err(FileOpError::NonEmptyDirectory {
                path: path.to_path_buf(),
            });
        }
        fs::remove_dir(path).map_err(|e| FileOpError::io(path, e))?;
        0
    } else {
        fs::remove_file(path).map_err(|e| FileOpError::io(path, e))?;
        metadata.len()
    };

    Ok(OperationComplete::new(OperationType::Delete, path, None, bytes))
}

//! Directory creation.

use std::fs;
use std::path::Path;

use filedeck_core::{ConflictKind, FileOpError, FileOpResult};

use crate::rename::validate_filename;
use crate::report::{OperationComplete, OperationType};

/// Create the directory `name` inside `parent`.
///
/// Only a single level is created; `parent` must already exist.
pub fn create_directory(parent: &Path, name: &str) -> FileOpResult<OperationComplete> {
    validate_filename(name)?;

    let path = parent.join(name);

    if let Ok(existing) = fs::symlink_metadata(&path) {
        let kind = if existing.is_dir() {
            ConflictKind::DirectoryExists
        } else {
            ConflictKind::FileExists
        };
        return Err(FileOpError::conflict(path, kind));
    }

    fs::create_dir(&path).map_err(|e| FileOpError::io(&path, e))?;

    Ok(OperationComplete::new(
        OperationType::CreateDirectory,
        path,
        None,
        0,
    ))
}

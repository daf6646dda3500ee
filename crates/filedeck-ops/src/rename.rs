//! Rename operation.

use std::fs;
use std::path::Path;

use filedeck_core::{ConflictKind, FileOpError, FileOpResult};

use crate::report::{OperationComplete, OperationType};

/// Rename an entry within its parent directory.
///
/// Fails with a conflict if a sibling already uses `new_name`; the entry is
/// left under its original name in that case. A name differing only in case
/// is not a conflict when the file system resolves it to the entry itself.
pub fn rename_entry(source: &Path, new_name: &str) -> FileOpResult<OperationComplete> {
    validate_filename(new_name)?;

    fs::symlink_metadata(source).map_err(|e| FileOpError::io(source, e))?;

    let parent = source.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(new_name);

    if new_path != source {
        if let Ok(existing) = fs::symlink_metadata(&new_path) {
            if !is_case_only_rename(source, &new_path) {
                let kind = if existing.is_dir() {
                    ConflictKind::DirectoryExists
                } else {
                    ConflictKind::FileExists
                };
                return Err(FileOpError::conflict(new_path, kind));
            }
        }

        fs::rename(source, &new_path).map_err(|e| FileOpError::io(source, e))?;
    }

    Ok(OperationComplete::new(
        OperationType::Rename,
        source,
        Some(new_path),
        0,
    ))
}

/// Check if `new_path` names `source` itself with different letter case.
fn is_case_only_rename(source: &Path, new_path: &Path) -> bool {
    let (Some(old), Some(new)) = (source.file_name(), new_path.file_name()) else {
        return false;
    };
    let (old, new) = (old.to_string_lossy(), new.to_string_lossy());
    old != new && old.to_lowercase() == new.to_lowercase() && same_entry(source, new_path)
}

#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Validate a name for use as a single path component.
pub fn validate_filename(name: &str) -> FileOpResult<()> {
    let invalid = |reason: String| Err(FileOpError::invalid_name(name, reason));

    if name.trim().is_empty() {
        return invalid("Name cannot be empty".into());
    }

    if name.len() > 255 {
        return invalid("Name is too long (max 255 characters)".into());
    }

    for c in ['/', '\0'] {
        if name.contains(c) {
            return invalid(format!("Name cannot contain '{}'", c.escape_default()));
        }
    }

    #[cfg(target_os = "windows")]
    {
        for c in ['\\', ':', '*', '?', '"', '<', '>', '|'] {
            if name.contains(c) {
                return invalid(format!("Name cannot contain '{c}'"));
            }
        }

        let reserved = [
            "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
            "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
        ];
        let upper_name = name.to_uppercase();
        let base_name = upper_name.split('.').next().unwrap_or("");
        if reserved.contains(&base_name) {
            return invalid("Reserved filename".into());
        }
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return invalid("Name cannot start or end with spaces".into());
    }

    if name == "." || name == ".." {
        return invalid("'.' and '..' are reserved names".into());
    }

    if name.ends_with('.') {
        return invalid("Name cannot end with a dot".into());
    }

    Ok(())
}

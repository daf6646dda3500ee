//! Copy operation.

use std::fs;
use std::io;
use std::path::Path;

use filedeck_core::{ConflictResolution, FileOpError, FileOpResult};
use tracing::debug;

use crate::report::{OperationComplete, OperationType};
use crate::target::{Target, discard, remove_tree, resolve_target, staging_path};

/// Copy `source` (file or directory tree) into `dest_dir`.
///
/// The copy is written to a hidden staging sibling first and only renamed
/// into place once it is complete, so a failed copy never leaves a partial
/// entry under the final name and never disturbs an entry it would replace.
pub fn copy_entry(
    source: &Path,
    dest_dir: &Path,
    resolution: ConflictResolution,
) -> FileOpResult<OperationComplete> {
    let target = resolve_target(source, dest_dir, resolution)?;
    let bytes = copy_into_place(source, &target)?;

    Ok(OperationComplete::new(
        OperationType::Copy,
        source,
        Some(target.path),
        bytes,
    ))
}

/// Copy `source` to `target`, replacing an existing entry if requested.
pub(crate) fn copy_into_place(source: &Path, target: &Target) -> FileOpResult<u64> {
    let staging = staging_path(&target.path);
    discard(&staging);

    let bytes = match copy_tree(source, &staging) {
        Ok(bytes) => bytes,
        Err(e) => {
            discard(&staging);
            return Err(e);
        }
    };

    if target.replaces {
        if let Err(e) = remove_tree(&target.path) {
            discard(&staging);
            return Err(FileOpError::io(&target.path, e));
        }
    }

    if let Err(e) = fs::rename(&staging, &target.path) {
        discard(&staging);
        return Err(FileOpError::io(&target.path, e));
    }

    debug!(
        source = %source.display(),
        dest = %target.path.display(),
        bytes,
        "copied entry"
    );
    Ok(bytes)
}

/// Copy a file or directory tree to `dest`, which must not exist yet.
///
/// Symlinks are followed, so a link is copied as the entry it points to.
fn copy_tree(source: &Path, dest: &Path) -> FileOpResult<u64> {
    let metadata = fs::metadata(source).map_err(|e| FileOpError::io(source, e))?;

    if metadata.is_dir() {
        fs::create_dir(dest).map_err(|e| FileOpError::io(dest, e))?;

        let mut options = fs_extra::dir::CopyOptions::new();
        options.content_only = true;
        fs_extra::dir::copy(source, dest, &options).map_err(|e| transfer_error(source, e))
    } else {
        fs::copy(source, dest).map_err(|e| FileOpError::io(source, e))
    }
}

/// Map an `fs_extra` failure onto the operation error taxonomy.
fn transfer_error(path: &Path, err: fs_extra::error::Error) -> FileOpError {
    use fs_extra::error::ErrorKind;

    let message = err.to_string();
    let kind = match err.kind {
        ErrorKind::Io(source) => return FileOpError::io(path, source),
        ErrorKind::NotFound => io::ErrorKind::NotFound,
        ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
        _ => io::ErrorKind::Other,
    };
    FileOpError::io(path, io::Error::new(kind, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::create_dir_all(root.join("tree/nested")).unwrap();
        fs::write(root.join("tree/one.txt"), "1").unwrap();
        fs::write(root.join("tree/nested/two.txt"), "22").unwrap();

        temp
    }

    #[test]
    fn test_copy_file() {
        let temp = fixture();
        let root = temp.path();

        let report =
            copy_entry(&root.join("a.txt"), &root.join("sub"), ConflictResolution::Overwrite)
                .unwrap();

        assert_eq!(report.operation_type, OperationType::Copy);
        assert_eq!(report.destination, Some(root.join("sub/a.txt")));
        assert_eq!(report.bytes_processed, 5);
        assert_eq!(fs::read_to_string(root.join("sub/a.txt")).unwrap(), "alpha");
        assert!(root.join("a.txt").exists());
    }

    #[test]
    fn test_copy_replaces_existing() {
        let temp = fixture();
        let root = temp.path();
        fs::write(root.join("sub/a.txt"), "stale content").unwrap();

        copy_entry(&root.join("a.txt"), &root.join("sub"), ConflictResolution::Overwrite).unwrap();

        assert_eq!(fs::read_to_string(root.join("sub/a.txt")).unwrap(), "alpha");
    }

    #[test]
    fn test_copy_directory_replaces_instead_of_merging() {
        let temp = fixture();
        let root = temp.path();
        fs::create_dir(root.join("sub/tree")).unwrap();
        fs::write(root.join("sub/tree/leftover.txt"), "old").unwrap();

        let report =
            copy_entry(&root.join("tree"), &root.join("sub"), ConflictResolution::Overwrite)
                .unwrap();

        assert_eq!(report.bytes_processed, 3);
        assert_eq!(fs::read_to_string(root.join("sub/tree/one.txt")).unwrap(), "1");
        assert_eq!(
            fs::read_to_string(root.join("sub/tree/nested/two.txt")).unwrap(),
            "22"
        );
        assert!(!root.join("sub/tree/leftover.txt").exists());
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = fixture();
        let root = temp.path();

        let err = copy_entry(
            &root.join("missing.txt"),
            &root.join("sub"),
            ConflictResolution::Overwrite,
        )
        .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(fs::read_dir(root.join("sub")).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_into_same_directory() {
        let temp = fixture();
        let root = temp.path();

        let err =
            copy_entry(&root.join("a.txt"), root, ConflictResolution::Overwrite).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "alpha");

        let report =
            copy_entry(&root.join("a.txt"), root, ConflictResolution::AutoRename).unwrap();
        assert_eq!(report.destination, Some(root.join("a (1).txt")));
        assert_eq!(fs::read_to_string(root.join("a (1).txt")).unwrap(), "alpha");
    }

    #[test]
    fn test_copy_leaves_no_staging_entry() {
        let temp = fixture();
        let root = temp.path();

        copy_entry(&root.join("tree"), &root.join("sub"), ConflictResolution::Overwrite).unwrap();

        let names: Vec<String> = fs::read_dir(root.join("sub"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["tree".to_string()]);
    }

    #[test]
    fn test_copy_never_replaces_its_own_parent() {
        let temp = fixture();
        let root = temp.path();
        fs::create_dir(root.join("sub/sub")).unwrap();
        fs::write(root.join("sub/sub/data.txt"), "data").unwrap();
        fs::write(root.join("sub/sibling.txt"), "s").unwrap();

        let err = copy_entry(&root.join("sub/sub"), root, ConflictResolution::Overwrite)
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(fs::read_to_string(root.join("sub/sub/data.txt")).unwrap(), "data");
        assert!(root.join("sub/sibling.txt").exists());
        assert!(!root.join(".sub.filedeck-part").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_directory_copy_removes_staging() {
        let temp = fixture();
        let root = temp.path();
        std::os::unix::fs::symlink(root.join("nowhere"), root.join("tree/dangling")).unwrap();
        fs::create_dir(root.join("sub/tree")).unwrap();
        fs::write(root.join("sub/tree/keep.txt"), "kept").unwrap();

        let result = copy_entry(
            &root.join("tree"),
            &root.join("sub"),
            ConflictResolution::Overwrite,
        );

        assert!(result.is_err());
        assert!(!root.join("sub/.tree.filedeck-part").exists());
        assert_eq!(
            fs::read_to_string(root.join("sub/tree/keep.txt")).unwrap(),
            "kept"
        );
        assert!(root.join("tree/one.txt").exists());
    }

    #[test]
    fn test_transfer_error_keeps_io_cause() {
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume");
        let err = fs_extra::error::Error::new(fs_extra::error::ErrorKind::Io(cause), "Io error");
        assert!(matches!(
            transfer_error(Path::new("/data/x"), err),
            FileOpError::PermissionDenied { .. }
        ));

        let cause = io::Error::other("device hiccup");
        let err = fs_extra::error::Error::new(fs_extra::error::ErrorKind::Io(cause), "Io error");
        let message = transfer_error(Path::new("/data/x"), err).to_string();
        assert_eq!(message, "I/O error at /data/x: device hiccup");
    }
}

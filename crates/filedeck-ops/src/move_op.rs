//! Move operation.

use std::fs;
use std::path::{Path, PathBuf};

use filedeck_core::{ConflictResolution, FileOpError, FileOpResult};
use tracing::{debug, warn};

use crate::copy::copy_into_place;
use crate::report::{OperationComplete, OperationType};
use crate::target::{Target, discard, remove_tree, resolve_target, sibling_path};

/// Suffix of the hidden sibling an entry being replaced is parked under.
const BACKUP_SUFFIX: &str = "filedeck-old";

/// Move `source` into `dest_dir` as a single operation.
///
/// A plain rename is tried first. If that fails (typically across file
/// systems) the entry is copied, and the original is removed only once the
/// copy is in place. An entry being replaced is parked aside and restored if
/// the move fails before the new entry lands.
///
/// If the copy succeeds but the original cannot be removed, both entries are
/// kept and [`FileOpError::MoveIncomplete`] is returned.
pub fn move_entry(
    source: &Path,
    dest_dir: &Path,
    resolution: ConflictResolution,
) -> FileOpResult<OperationComplete> {
    let target = resolve_target(source, dest_dir, resolution)?;
    let bytes = fs_extra::dir::get_size(source).unwrap_or(0);

    let backup = if target.replaces {
        Some(park(&target.path)?)
    } else {
        None
    };

    match fs::rename(source, &target.path) {
        Ok(()) => {
            if let Some(backup) = &backup {
                discard(backup);
            }
            return Ok(report(source, target.path, bytes));
        }
        Err(e) => {
            debug!(
                source = %source.display(),
                error = %e,
                "rename failed, falling back to copy and remove"
            );
        }
    }

    let fresh = Target {
        path: target.path.clone(),
        replaces: false,
    };
    if let Err(e) = copy_into_place(source, &fresh) {
        if let Some(backup) = &backup {
            unpark(backup, &target.path);
        }
        return Err(e);
    }

    if let Some(backup) = &backup {
        discard(backup);
    }

    if let Err(cause) = remove_tree(source) {
        warn!(
            source = %source.display(),
            dest = %target.path.display(),
            error = %cause,
            "copied entry but could not remove the original"
        );
        return Err(FileOpError::MoveIncomplete {
            from: source.to_path_buf(),
            to: target.path,
            cause,
        });
    }

    Ok(report(source, target.path, bytes))
}

fn report(source: &Path, dest: PathBuf, bytes: u64) -> OperationComplete {
    OperationComplete::new(OperationType::Move, source, Some(dest), bytes)
}

/// Rename an existing entry out of the way so it can be restored later.
fn park(path: &Path) -> FileOpResult<PathBuf> {
    let backup = sibling_path(path, BACKUP_SUFFIX);
    discard(&backup);
    fs::rename(path, &backup).map_err(|e| FileOpError::io(path, e))?;
    Ok(backup)
}

fn unpark(backup: &Path, path: &Path) {
    if let Err(e) = fs::rename(backup, path) {
        warn!(
            backup = %backup.display(),
            path = %path.display(),
            error = %e,
            "failed to restore replaced entry"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedeck_core::ConflictKind;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::create_dir_all(root.join("tree/nested")).unwrap();
        fs::write(root.join("tree/nested/two.txt"), "22").unwrap();

        temp
    }

    #[test]
    fn test_move_file() {
        let temp = fixture();
        let root = temp.path();

        let report =
            move_entry(&root.join("a.txt"), &root.join("sub"), ConflictResolution::Overwrite)
                .unwrap();

        assert_eq!(report.operation_type, OperationType::Move);
        assert_eq!(report.bytes_processed, 5);
        assert!(!root.join("a.txt").exists());
        assert_eq!(fs::read_to_string(root.join("sub/a.txt")).unwrap(), "alpha");
    }

    #[test]
    fn test_move_directory() {
        let temp = fixture();
        let root = temp.path();

        move_entry(&root.join("tree"), &root.join("sub"), ConflictResolution::Overwrite).unwrap();

        assert!(!root.join("tree").exists());
        assert_eq!(
            fs::read_to_string(root.join("sub/tree/nested/two.txt")).unwrap(),
            "22"
        );
    }

    #[test]
    fn test_move_replaces_existing_directory() {
        let temp = fixture();
        let root = temp.path();
        fs::create_dir(root.join("sub/tree")).unwrap();
        fs::write(root.join("sub/tree/leftover.txt"), "old").unwrap();

        move_entry(&root.join("tree"), &root.join("sub"), ConflictResolution::Overwrite).unwrap();

        assert!(!root.join("sub/tree/leftover.txt").exists());
        assert!(root.join("sub/tree/nested/two.txt").exists());
        assert!(!root.join("sub/.tree.filedeck-old").exists());
    }

    #[test]
    fn test_move_into_parent_of_same_name_is_refused() {
        let temp = fixture();
        let root = temp.path();
        fs::create_dir_all(root.join("box/box")).unwrap();
        fs::write(root.join("box/box/data.txt"), "data").unwrap();
        fs::write(root.join("box/sibling.txt"), "s").unwrap();

        let err = move_entry(&root.join("box/box"), root, ConflictResolution::Overwrite)
            .unwrap_err();

        assert!(matches!(
            err,
            FileOpError::Conflict {
                kind: ConflictKind::TargetContainsSource,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(root.join("box/box/data.txt")).unwrap(), "data");
        assert!(root.join("box/sibling.txt").exists());
        assert!(!root.join(".box.filedeck-old").exists());
    }

    #[test]
    fn test_move_missing_source_changes_nothing() {
        let temp = fixture();
        let root = temp.path();
        fs::write(root.join("sub/gone.txt"), "keep").unwrap();

        let err = move_entry(
            &root.join("gone.txt"),
            &root.join("sub"),
            ConflictResolution::Overwrite,
        )
        .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(fs::read_to_string(root.join("sub/gone.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_move_into_own_subtree() {
        let temp = fixture();
        let root = temp.path();

        let err = move_entry(
            &root.join("tree"),
            &root.join("tree/nested"),
            ConflictResolution::Overwrite,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FileOpError::Conflict {
                kind: ConflictKind::SourceIsAncestor,
                ..
            }
        ));
        assert!(root.join("tree/nested/two.txt").exists());
    }

    #[test]
    fn test_move_skip_policy() {
        let temp = fixture();
        let root = temp.path();
        fs::write(root.join("sub/a.txt"), "existing").unwrap();

        let err = move_entry(&root.join("a.txt"), &root.join("sub"), ConflictResolution::Skip)
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(root.join("a.txt").exists());
        assert_eq!(fs::read_to_string(root.join("sub/a.txt")).unwrap(), "existing");
    }
}

//! Destination resolution shared by copy and move.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filedeck_core::{ConflictKind, ConflictResolution, FileOpError, FileOpResult, auto_rename_path};
use tracing::debug;

use crate::STAGING_SUFFIX;

/// Where a copied or moved entry will land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    /// Final path of the entry.
    pub path: PathBuf,
    /// Whether an existing entry at `path` must be replaced.
    pub replaces: bool,
}

/// Work out the destination of `source` inside `dest_dir`.
///
/// Fails without touching the file system when the source is missing, the
/// destination directory is unusable, a directory would be placed inside
/// itself, or the name is taken and the policy does not allow replacing it.
pub(crate) fn resolve_target(
    source: &Path,
    dest_dir: &Path,
    resolution: ConflictResolution,
) -> FileOpResult<Target> {
    let source_meta = fs::symlink_metadata(source).map_err(|e| FileOpError::io(source, e))?;

    let dest_meta = fs::metadata(dest_dir).map_err(|e| FileOpError::io(dest_dir, e))?;
    if !dest_meta.is_dir() {
        return Err(FileOpError::NotADirectory {
            path: dest_dir.to_path_buf(),
        });
    }

    let name = source.file_name().ok_or_else(|| {
        FileOpError::invalid_name(source.display().to_string(), "Path has no file name")
    })?;
    let dest = dest_dir.join(name);

    if source_meta.is_dir() && is_within(dest_dir, source) {
        return Err(FileOpError::conflict(dest, ConflictKind::SourceIsAncestor));
    }

    let existing = match fs::symlink_metadata(&dest) {
        Ok(meta) => meta,
        Err(_) => {
            return Ok(Target {
                path: dest,
                replaces: false,
            });
        }
    };

    if resolution == ConflictResolution::AutoRename {
        let renamed = auto_rename_path(&dest);
        debug!(from = %dest.display(), to = %renamed.display(), "auto-renaming destination");
        return Ok(Target {
            path: renamed,
            replaces: false,
        });
    }

    if same_parent(source, dest_dir) {
        return Err(FileOpError::conflict(dest, ConflictKind::SameFile));
    }

    if existing.is_dir() && contains(&dest, source) {
        return Err(FileOpError::conflict(dest, ConflictKind::TargetContainsSource));
    }

    match resolution {
        ConflictResolution::Overwrite => Ok(Target {
            path: dest,
            replaces: true,
        }),
        _ => {
            let kind = if existing.is_dir() {
                ConflictKind::DirectoryExists
            } else {
                ConflictKind::FileExists
            };
            Err(FileOpError::conflict(dest, kind))
        }
    }
}

/// Hidden sibling path used while an entry is being written.
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{suffix}"))
}

/// Staging path for a copy headed to `path`.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    sibling_path(path, STAGING_SUFFIX)
}

/// Remove a file, symlink or whole directory tree.
pub(crate) fn remove_tree(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Best-effort removal of a leftover staging or backup entry.
pub(crate) fn discard(path: &Path) {
    if fs::symlink_metadata(path).is_ok() {
        if let Err(e) = remove_tree(path) {
            debug!(path = %path.display(), error = %e, "failed to discard temporary entry");
        }
    }
}

/// Check whether `dir` is `ancestor` or lies beneath it.
fn is_within(dir: &Path, ancestor: &Path) -> bool {
    match (dir.canonicalize(), ancestor.canonicalize()) {
        (Ok(dir), Ok(ancestor)) => dir.starts_with(ancestor),
        _ => dir.starts_with(ancestor),
    }
}

/// Check whether `path` (not followed if it is a symlink) lies beneath `dir`.
fn contains(dir: &Path, path: &Path) -> bool {
    let Ok(dir) = dir.canonicalize() else {
        return false;
    };
    let located = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    };
    located.starts_with(dir)
}

/// Check whether `source` already lives directly in `dir`.
fn same_parent(source: &Path, dir: &Path) -> bool {
    let Some(parent) = source.parent() else {
        return false;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    match (parent.canonicalize(), dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => parent == dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_free_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let target = resolve_target(
            &temp.path().join("a.txt"),
            &temp.path().join("sub"),
            ConflictResolution::Overwrite,
        )
        .unwrap();
        assert_eq!(target.path, temp.path().join("sub/a.txt"));
        assert!(!target.replaces);
    }

    #[test]
    fn test_resolve_existing_by_policy() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/a.txt"), "old").unwrap();
        let source = temp.path().join("a.txt");
        let dest_dir = temp.path().join("sub");

        let target = resolve_target(&source, &dest_dir, ConflictResolution::Overwrite).unwrap();
        assert!(target.replaces);

        let err = resolve_target(&source, &dest_dir, ConflictResolution::Skip).unwrap_err();
        assert!(matches!(
            err,
            FileOpError::Conflict {
                kind: ConflictKind::FileExists,
                ..
            }
        ));

        let target = resolve_target(&source, &dest_dir, ConflictResolution::AutoRename).unwrap();
        assert_eq!(target.path, dest_dir.join("a (1).txt"));
    }

    #[test]
    fn test_resolve_same_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let source = temp.path().join("a.txt");

        let err = resolve_target(&source, temp.path(), ConflictResolution::Overwrite).unwrap_err();
        assert!(matches!(
            err,
            FileOpError::Conflict {
                kind: ConflictKind::SameFile,
                ..
            }
        ));

        let target = resolve_target(&source, temp.path(), ConflictResolution::AutoRename).unwrap();
        assert_eq!(target.path, temp.path().join("a (1).txt"));
    }

    #[test]
    fn test_resolve_into_own_subtree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("outer/inner")).unwrap();

        let err = resolve_target(
            &temp.path().join("outer"),
            &temp.path().join("outer/inner"),
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
    }

    #[test]
    fn test_resolve_refuses_to_replace_source_parent() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub/sub")).unwrap();
        fs::create_dir(temp.path().join("d")).unwrap();
        fs::write(temp.path().join("d/d"), "inner").unwrap();

        for (source, dest) in [("sub/sub", "sub"), ("d/d", "d")] {
            for resolution in [ConflictResolution::Overwrite, ConflictResolution::Skip] {
                let err =
                    resolve_target(&temp.path().join(source), temp.path(), resolution).unwrap_err();
                assert!(
                    matches!(
                        err,
                        FileOpError::Conflict {
                            kind: ConflictKind::TargetContainsSource,
                            ref path,
                        } if *path == temp.path().join(dest)
                    ),
                    "{source} with {resolution}: {err}"
                );
            }
        }

        let target = resolve_target(
            &temp.path().join("sub/sub"),
            temp.path(),
            ConflictResolution::AutoRename,
        )
        .unwrap();
        assert_eq!(target.path, temp.path().join("sub (1)"));
    }

    #[test]
    fn test_resolve_missing_source_or_destination() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let err = resolve_target(
            &temp.path().join("gone.txt"),
            temp.path(),
            ConflictResolution::Overwrite,
        )
        .unwrap_err();
        assert!(err.is_not_found());

        let err = resolve_target(
            &temp.path().join("a.txt"),
            &temp.path().join("a.txt"),
            ConflictResolution::Overwrite,
        )
        .unwrap_err();
        assert!(matches!(err, FileOpError::NotADirectory { .. }));
    }

    #[test]
    fn test_staging_path() {
        let path = PathBuf::from("/data/report.pdf");
        assert_eq!(
            staging_path(&path),
            PathBuf::from("/data/.report.pdf.filedeck-part")
        );
    }
}

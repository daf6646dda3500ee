//! Directory listing.

use std::fs;
use std::path::Path;

use filedeck_core::{Entry, FileOpError, FileOpResult};
use tracing::debug;

/// List the entries of `dir` in the order the OS returns them.
///
/// Entries that vanish between `read_dir` and the metadata lookup are
/// skipped.
pub fn list_entries(dir: &Path, show_hidden: bool) -> FileOpResult<Vec<Entry>> {
    let metadata = fs::metadata(dir).map_err(|e| FileOpError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(FileOpError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for item in fs::read_dir(dir).map_err(|e| FileOpError::io(dir, e))? {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = item.path();
        let entry = match fs::symlink_metadata(&path) {
            Ok(metadata) => Entry::from_metadata(path, &metadata),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "entry vanished while listing");
                continue;
            }
        };

        if !show_hidden && entry.is_hidden() {
            continue;
        }
        entries.push(entry);
    }

    Ok(entries)
}

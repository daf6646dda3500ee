//! The file operation controller.

use std::path::{Path, PathBuf};

use filedeck_core::{
    ConflictResolution, ControllerConfig, DirectoryListing, Entry, FileOpError, FileOpResult,
};
use filedeck_ops::{FileSystem, StdFileSystem, validate_filename};
use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, ClipboardMode};
use crate::command::{Command, CommandOutcome};

/// Translates user commands into file-system calls and keeps the listing in
/// step with the disk.
///
/// One controller is created per session and handed to the presentation
/// layer. Every command runs to completion before the next one is accepted.
#[derive(Debug)]
pub struct FileOperationController<F = StdFileSystem> {
    fs: F,
    config: ControllerConfig,
    current_dir: PathBuf,
    listing: DirectoryListing,
    selection: Option<PathBuf>,
    clipboard: Clipboard,
}

impl FileOperationController<StdFileSystem> {
    /// Open a session on the host file system.
    pub fn new(config: ControllerConfig) -> FileOpResult<Self> {
        Self::with_file_system(StdFileSystem::new(), config)
    }
}

impl<F: FileSystem> FileOperationController<F> {
    /// Open a session on the given file system, listing the start directory.
    pub fn with_file_system(fs: F, config: ControllerConfig) -> FileOpResult<Self> {
        let start = config.start_dir.clone();
        let entries = fs.list_entries(&start, config.show_hidden)?;
        let current_dir = normalize(start);

        Ok(Self {
            fs,
            listing: DirectoryListing::new(&current_dir, entries),
            current_dir,
            config,
            selection: None,
            clipboard: Clipboard::default(),
        })
    }

    /// Directory currently browsed.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Latest listing of the current directory.
    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    /// The selected entry, if any.
    pub fn selection(&self) -> Option<&Entry> {
        let selected = self.selection.as_deref()?;
        self.listing.iter().find(|e| e.path == selected)
    }

    /// The clipboard.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Session configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Change how paste and move treat existing entries.
    pub fn set_conflict_resolution(&mut self, resolution: ConflictResolution) {
        self.config.conflict_resolution = resolution;
    }

    /// The underlying file system.
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Dispatch a command.
    pub fn execute(&mut self, command: Command) -> FileOpResult<CommandOutcome> {
        debug!(?command, dir = %self.current_dir.display(), "executing command");

        match command {
            Command::ChangeDirectory(path) => self.change_directory(path),
            Command::Select(name) => self.select(&name),
            Command::ClearSelection => Ok(self.clear_selection()),
            Command::MarkForCopy => Ok(self.mark_for_copy()),
            Command::MarkForCut => Ok(self.mark_for_cut()),
            Command::Paste => self.paste(),
            Command::Move => self.move_here(),
            Command::Delete => self.delete(),
            Command::Rename(new_name) => self.rename(&new_name),
            Command::CreateFolder(name) => self.create_folder(&name),
            Command::Refresh => self.refresh(),
        }
    }

    /// Browse another directory.
    ///
    /// On failure the session stays where it was.
    pub fn change_directory(&mut self, path: impl AsRef<Path>) -> FileOpResult<CommandOutcome> {
        let path = path.as_ref();
        let target = if path.is_relative() {
            self.current_dir.join(path)
        } else {
            path.to_path_buf()
        };

        let entries = self.fs.list_entries(&target, self.config.show_hidden)?;
        let target = normalize(target);

        self.listing = DirectoryListing::new(&target, entries);
        self.current_dir = target;
        self.selection = None;

        info!(dir = %self.current_dir.display(), "changed directory");
        Ok(CommandOutcome::Navigated {
            dir: self.current_dir.clone(),
        })
    }

    /// Select an entry of the current listing by name.
    pub fn select(&mut self, name: &str) -> FileOpResult<CommandOutcome> {
        let entry = self.listing.find(name).ok_or_else(|| FileOpError::NotFound {
            path: self.current_dir.join(name),
        })?;

        let path = entry.path.clone();
        self.selection = Some(path.clone());
        Ok(CommandOutcome::Selected { path })
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) -> CommandOutcome {
        self.selection = None;
        CommandOutcome::SelectionCleared
    }

    /// Remember the selection for a later paste.
    pub fn mark_for_copy(&mut self) -> CommandOutcome {
        self.mark(ClipboardMode::Copy)
    }

    /// Remember the selection for a later move.
    pub fn mark_for_cut(&mut self) -> CommandOutcome {
        self.mark(ClipboardMode::Cut)
    }

    fn mark(&mut self, mode: ClipboardMode) -> CommandOutcome {
        let Some(path) = self.selection.clone() else {
            debug!(%mode, "nothing selected, clipboard unchanged");
            return CommandOutcome::Unchanged {
                reason: "Nothing selected",
            };
        };

        match mode {
            ClipboardMode::Cut => self.clipboard.cut(&path),
            _ => self.clipboard.copy(&path),
        }
        CommandOutcome::Marked { mode, path }
    }

    /// Copy the clipboard entry into the current directory.
    ///
    /// The listing is re-read whether or not the copy succeeded.
    pub fn paste(&mut self) -> FileOpResult<CommandOutcome> {
        let Some(source) = self.clipboard.entry().map(Path::to_path_buf) else {
            return Ok(CommandOutcome::Unchanged {
                reason: "Clipboard is empty",
            });
        };

        let result = self
            .fs
            .copy_entry(&source, &self.current_dir, self.config.conflict_resolution);
        self.reload_after_change();

        let report = result.inspect_err(|e| {
            warn!(source = %source.display(), error = %e, "paste failed");
        })?;
        info!(summary = %report.summary(), "paste complete");
        Ok(CommandOutcome::Completed(report))
    }

    /// Move the clipboard entry into the current directory.
    ///
    /// Only a cut entry is removed from its original location; after a copy
    /// mark this behaves like [`paste`](Self::paste). The clipboard is cleared
    /// once a cut entry has been moved.
    pub fn move_here(&mut self) -> FileOpResult<CommandOutcome> {
        let Some(source) = self.clipboard.entry().map(Path::to_path_buf) else {
            return Ok(CommandOutcome::Unchanged {
                reason: "Clipboard is empty",
            });
        };

        if self.clipboard.mode() != ClipboardMode::Cut {
            debug!(source = %source.display(), "clipboard holds a copy, keeping the original");
            return self.paste();
        }

        let result = self
            .fs
            .move_entry(&source, &self.current_dir, self.config.conflict_resolution);
        self.reload_after_change();

        let report = result.inspect_err(|e| {
            warn!(source = %source.display(), error = %e, "move failed");
        })?;
        self.clipboard.clear();
        info!(summary = %report.summary(), "move complete");
        Ok(CommandOutcome::Completed(report))
    }

    /// Delete the selection (files and empty directories only).
    pub fn delete(&mut self) -> FileOpResult<CommandOutcome> {
        let Some(path) = self.selection.clone() else {
            return Ok(CommandOutcome::Unchanged {
                reason: "Nothing selected",
            });
        };

        let result = self.fs.delete_entry(&path);
        self.reload_after_change();

        let report = result.inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "delete failed");
        })?;
        info!(summary = %report.summary(), "delete complete");
        Ok(CommandOutcome::Completed(report))
    }

    /// Rename the selection within its directory.
    ///
    /// The listing is only re-read when the rename succeeds.
    pub fn rename(&mut self, new_name: &str) -> FileOpResult<CommandOutcome> {
        let Some(path) = self.selection.clone() else {
            return Ok(CommandOutcome::Unchanged {
                reason: "Nothing selected",
            });
        };

        validate_filename(new_name)?;

        let report = self
            .fs
            .rename_entry(&path, new_name)
            .inspect_err(|e| {
                warn!(path = %path.display(), error = %e, "rename failed");
            })?;

        if let Some(renamed) = &report.destination {
            self.clipboard.retarget(&path, renamed);
            self.selection = Some(renamed.clone());
        }
        self.reload_after_change();

        info!(summary = %report.summary(), "rename complete");
        Ok(CommandOutcome::Completed(report))
    }

    /// Create a folder in the current directory.
    ///
    /// Blank names are rejected before the file system is touched.
    pub fn create_folder(&mut self, name: &str) -> FileOpResult<CommandOutcome> {
        if name.trim().is_empty() {
            return Err(FileOpError::invalid_name(name, "Name cannot be empty"));
        }
        validate_filename(name)?;

        let result = self.fs.create_directory(&self.current_dir, name);
        self.reload_after_change();

        let report = result.inspect_err(|e| warn!(name, error = %e, "create folder failed"))?;
        info!(summary = %report.summary(), "folder created");
        Ok(CommandOutcome::Completed(report))
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) -> FileOpResult<CommandOutcome> {
        self.reload()?;
        Ok(CommandOutcome::Refreshed {
            entries: self.listing.len(),
        })
    }

    /// Replace the listing with a fresh one and drop a selection that no
    /// longer exists.
    fn reload(&mut self) -> FileOpResult<()> {
        match self
            .fs
            .list_entries(&self.current_dir, self.config.show_hidden)
        {
            Ok(entries) => {
                self.listing = DirectoryListing::new(&self.current_dir, entries);
                if let Some(selected) = &self.selection {
                    if !self.listing.contains_path(selected) {
                        self.selection = None;
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.listing = DirectoryListing::empty(&self.current_dir);
                self.selection = None;
                Err(e)
            }
        }
    }

    /// Reload after a mutation; the mutation's own result takes precedence
    /// over a listing failure.
    fn reload_after_change(&mut self) {
        if let Err(e) = self.reload() {
            warn!(dir = %self.current_dir.display(), error = %e, "failed to refresh listing");
        }
    }
}

/// Absolute, symlink-free form of a directory that was just listed.
fn normalize(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}

//! Core types for filedeck.
//!
//! This crate provides the data structures shared by the file-system
//! collaborator, the controller and the shell: directory entries and
//! listings, the operation error taxonomy, conflict handling types and
//! controller configuration.

mod config;
mod conflict;
mod entry;
mod error;
mod listing;

pub use config::{ControllerConfig, ControllerConfigBuilder};
pub use conflict::{ConflictKind, ConflictResolution, auto_rename_path};
pub use entry::{Entry, EntryKind};
pub use error::{FileOpError, FileOpResult};
pub use listing::DirectoryListing;

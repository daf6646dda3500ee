//! File-system primitives for filedeck.
//!
//! Every operation here is a thin, synchronous wrapper over `std::fs`
//! (plus `fs_extra` for recursive directory copies) that reports failures as
//! [`FileOpError`](filedeck_core::FileOpError). The [`FileSystem`] trait
//! bundles the primitives so the controller can be driven against the real
//! file system or a test double.

mod copy;
mod create;
mod delete;
mod fs;
mod listing;
mod move_op;
mod rename;
mod report;
mod target;

pub use copy::copy_entry;
pub use create::create_directory;
pub use delete::delete_entry;
pub use fs::{FileSystem, StdFileSystem};
pub use listing::list_entries;
pub use move_op::move_entry;
pub use rename::{rename_entry, validate_filename};
pub use report::{OperationComplete, OperationType};

/// Suffix of the hidden sibling a copy is written to before it is promoted.
pub const STAGING_SUFFIX: &str = "filedeck-part";

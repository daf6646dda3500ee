//! Session state and command execution for filedeck.
//!
//! [`FileOperationController`] owns everything a browsing session needs
//! (current directory, listing, selection and clipboard) and turns discrete
//! [`Command`]s into calls on a [`FileSystem`](filedeck_ops::FileSystem).
//! [`OperationWorker`] runs those commands off the interaction thread while
//! keeping the one-command-at-a-time guarantee through an explicit busy state.

mod clipboard;
mod command;
mod controller;
mod worker;

pub use clipboard::{Clipboard, ClipboardMode};
pub use command::{Command, CommandOutcome};
pub use controller::FileOperationController;
pub use worker::{OperationWorker, WorkerState};

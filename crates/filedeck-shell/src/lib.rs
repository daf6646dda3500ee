//! Line-oriented interactive shell for filedeck.
//!
//! Reads one command per line, hands file operations to an
//! [`OperationWorker`](filedeck_session::OperationWorker) and prints the
//! resulting notifications and listings.

mod commands;
mod render;
mod settings;
mod shell;

pub use commands::{ShellAction, parse_command};
pub use render::{display_order, format_entry, format_modified, format_size, render_listing};
pub use settings::UserSettings;
pub use shell::{Shell, ShellOptions};

use std::io;

use filedeck_session::FileOperationController;

/// Run a shell on standard input and output.
pub async fn run_stdio(
    controller: FileOperationController,
    options: ShellOptions,
) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(controller, stdout.lock(), options);
    shell.run(stdin.lock()).await
}

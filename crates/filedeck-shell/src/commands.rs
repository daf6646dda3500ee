//! Shell command parsing.

use std::path::PathBuf;

use filedeck_core::ConflictResolution;
use filedeck_session::Command;
use itertools::Itertools;
use strum::IntoEnumIterator;

/// Action to perform for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Blank line or a cancelled prompt.
    None,
    /// Leave the shell.
    Quit,
    /// Print the command reference.
    ShowHelp,
    /// Print the current listing.
    List,
    /// Print the current directory.
    PrintDir,
    /// Change the conflict policy for the rest of the session.
    SetPolicy(ConflictResolution),
    /// Hand a command to the controller.
    Run(Command),
    /// The line could not be understood.
    Invalid(String),
}

/// Parse one line of shell input.
///
/// Everything after the command word is taken as a single argument, so names
/// may contain spaces.
pub fn parse_command(line: &str) -> ShellAction {
    let line = line.trim();
    if line.is_empty() {
        return ShellAction::None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    match word {
        "q" | "quit" | "exit" => ShellAction::Quit,
        "help" | "?" => ShellAction::ShowHelp,
        "ls" | "list" | "l" => ShellAction::List,
        "pwd" => ShellAction::PrintDir,
        "r" | "refresh" => ShellAction::Run(Command::Refresh),

        // No path is a cancelled directory picker
        "cd" => match arg {
            Some(path) => ShellAction::Run(Command::ChangeDirectory(PathBuf::from(path))),
            None => ShellAction::None,
        },

        "select" | "sel" | "s" => match arg {
            Some(name) => ShellAction::Run(Command::Select(name.to_string())),
            None => ShellAction::Invalid("Usage: select <name>".to_string()),
        },
        "unselect" => ShellAction::Run(Command::ClearSelection),

        // File operations
        "copy" | "cp" | "yank" | "y" => ShellAction::Run(Command::MarkForCopy),
        "cut" | "x" => ShellAction::Run(Command::MarkForCut),
        "paste" | "p" => ShellAction::Run(Command::Paste),
        "move" | "mv" => ShellAction::Run(Command::Move),
        "delete" | "del" | "rm" => ShellAction::Run(Command::Delete),

        // An empty name is passed through so the controller reports it
        "rename" | "ren" => ShellAction::Run(Command::Rename(rest.to_string())),
        "mkdir" | "md" => ShellAction::Run(Command::CreateFolder(rest.to_string())),

        "policy" => match arg.map(str::parse::<ConflictResolution>) {
            Some(Ok(policy)) => ShellAction::SetPolicy(policy),
            _ => ShellAction::Invalid(format!("Usage: policy <{}>", policy_names())),
        },

        other => ShellAction::Invalid(format!("Unknown command: {other}")),
    }
}

fn policy_names() -> String {
    ConflictResolution::iter().join("|")
}

//! filedeck - a small directory browser with file operations.
//!
//! Usage:
//!   filedeck [PATH]              Launch the interactive shell
//!   filedeck list [PATH]         Print one listing and exit
//!   filedeck --help              Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use filedeck_core::{ConflictResolution, DirectoryListing};
use filedeck_session::FileOperationController;
use filedeck_shell::{ShellOptions, UserSettings, render_listing};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FILEDECK_LOG";

#[derive(Parser)]
#[command(
    name = "filedeck",
    version,
    about = "A small directory browser with file operations",
    long_about = "filedeck lets you browse directories and copy, move, rename, \
                  delete and create entries from a line-oriented shell.\n\n\
                  Launch the shell by running `filedeck [PATH]`, or use \
                  `filedeck list` for a one-off listing."
)]
struct Cli {
    /// Directory to start in (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden entries
    #[arg(long, overrides_with = "no_hidden")]
    hidden: bool,

    /// Hide dot-prefixed entries
    #[arg(long, overrides_with = "hidden")]
    no_hidden: bool,

    /// What paste and move do when the destination name is taken
    #[arg(short, long, value_enum)]
    conflict: Option<ConflictPolicy>,

    /// Write the effective settings to the config file
    #[arg(long)]
    save_settings: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a directory listing and exit
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConflictPolicy {
    Overwrite,
    Skip,
    AutoRename,
}

impl From<ConflictPolicy> for ConflictResolution {
    fn from(policy: ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::Overwrite => ConflictResolution::Overwrite,
            ConflictPolicy::Skip => ConflictResolution::Skip,
            ConflictPolicy::AutoRename => ConflictResolution::AutoRename,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = effective_settings(&cli);
    debug!(?settings, "effective settings");
    if cli.save_settings {
        let path = settings.save().context("Failed to save settings")?;
        info!(path = %path.display(), "saved settings");
    }

    match cli.command {
        Some(Command::List { path, json }) => run_list(&path, json, &settings),
        None => run_shell(&cli.path, &settings),
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}

/// Saved settings with command-line overrides applied.
fn effective_settings(cli: &Cli) -> UserSettings {
    let mut settings = UserSettings::load();
    if cli.hidden {
        settings.show_hidden = true;
    }
    if cli.no_hidden {
        settings.show_hidden = false;
    }
    if let Some(policy) = cli.conflict {
        settings.conflict_resolution = policy.into();
    }
    settings
}

/// Launch the interactive shell.
fn run_shell(path: &Path, settings: &UserSettings) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let controller = FileOperationController::new(settings.controller_config(&path))
        .with_context(|| format!("Cannot open {}", path.display()))?;

    let options = ShellOptions {
        dirs_first: settings.dirs_first,
        prompt: true,
    };

    info!(dir = %path.display(), "starting shell");
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    runtime
        .block_on(filedeck_shell::run_stdio(controller, options))
        .context("Shell I/O failed")?;

    Ok(())
}

/// Print one listing.
fn run_list(path: &Path, json: bool, settings: &UserSettings) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let entries = filedeck_ops::list_entries(&path, settings.show_hidden)
        .with_context(|| format!("Cannot list {}", path.display()))?;
    let listing = DirectoryListing::new(&path, entries);

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", render_listing(&listing, settings.dirs_first, None));
    }

    Ok(())
}

//! The interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use filedeck_core::FileOpError;
use filedeck_ops::FileSystem;
use filedeck_session::{CommandOutcome, FileOperationController, OperationWorker};
use tracing::{debug, info};

use crate::commands::{ShellAction, parse_command};
use crate::render::render_listing;

const HELP: &str = "\
Commands:
  ls, list, l           show the current directory
  pwd                   print the current directory
  cd <path>             change directory
  select, sel, s <name> select an entry
  unselect              clear the selection
  copy, cp, yank, y     mark the selection for copying
  cut, x                mark the selection for moving
  paste, p              copy the marked entry here
  move, mv              move the cut entry here
  delete, del, rm       delete the selection (files and empty folders)
  rename, ren <name>    rename the selection
  mkdir, md <name>      create a folder
  policy <overwrite|skip|auto-rename>
                        what to do when a name is taken
  refresh, r            re-read the current directory
  help, ?               show this help
  quit, q, exit         leave
";

/// Display options for the shell.
#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    /// List directories before files.
    pub dirs_first: bool,
    /// Print a prompt before reading each line.
    pub prompt: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            dirs_first: true,
            prompt: true,
        }
    }
}

/// Whether the loop keeps reading.
enum Flow {
    Continue,
    Quit,
}

/// A shell session writing to `W`.
pub struct Shell<F, W> {
    worker: OperationWorker<F>,
    output: W,
    options: ShellOptions,
}

impl<F, W> Shell<F, W>
where
    F: FileSystem + Send + 'static,
    W: Write,
{
    /// Create a shell around a controller.
    pub fn new(controller: FileOperationController<F>, output: W, options: ShellOptions) -> Self {
        Self {
            worker: OperationWorker::new(controller),
            output,
            options,
        }
    }

    /// Read commands from `input` until it ends or the user quits.
    pub async fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.print_listing()?;

        let mut lines = input.lines();
        loop {
            self.prompt()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let action = parse_command(&line);
            debug!(?action, "parsed input");
            if let Flow::Quit = self.handle(action).await? {
                break;
            }
        }

        info!("shell finished");
        self.output.flush()
    }

    /// Take the controller and output back.
    pub fn into_parts(self) -> (Option<FileOperationController<F>>, W) {
        (self.worker.into_controller(), self.output)
    }

    async fn handle(&mut self, action: ShellAction) -> io::Result<Flow> {
        match action {
            ShellAction::None => {}
            ShellAction::Quit => return Ok(Flow::Quit),
            ShellAction::ShowHelp => write!(self.output, "{HELP}")?,
            ShellAction::List => self.print_listing()?,
            ShellAction::PrintDir => {
                if let Some(controller) = self.worker.controller() {
                    writeln!(self.output, "{}", controller.current_dir().display())?;
                }
            }
            ShellAction::SetPolicy(policy) => {
                if let Some(controller) = self.worker.controller_mut() {
                    controller.set_conflict_resolution(policy);
                    writeln!(self.output, "Conflict policy: {policy}")?;
                }
            }
            ShellAction::Invalid(message) => writeln!(self.output, "{message}")?,
            ShellAction::Run(command) => match self.worker.run(command).await {
                Ok(outcome) => {
                    writeln!(self.output, "{}", outcome.message())?;
                    if let CommandOutcome::Navigated { .. } = outcome {
                        self.print_listing()?;
                    }
                }
                Err(FileOpError::WorkerStopped) => {
                    writeln!(self.output, "error: {}", FileOpError::WorkerStopped)?;
                    return Ok(Flow::Quit);
                }
                Err(e) => writeln!(self.output, "error: {e}")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn print_listing(&mut self) -> io::Result<()> {
        let Some(controller) = self.worker.controller() else {
            return Ok(());
        };
        let selection = controller.selection().map(|e| e.path.as_path());
        let rendered = render_listing(controller.listing(), self.options.dirs_first, selection);
        write!(self.output, "{rendered}")
    }

    fn prompt(&mut self) -> io::Result<()> {
        if !self.options.prompt {
            return Ok(());
        }
        let dir = self
            .worker
            .controller()
            .map(|c| c.current_dir().display().to_string())
            .unwrap_or_default();
        write!(self.output, "{dir}> ")?;
        self.output.flush()
    }
}

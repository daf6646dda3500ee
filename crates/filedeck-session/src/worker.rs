//! Background execution of controller commands.

use filedeck_core::{FileOpError, FileOpResult};
use filedeck_ops::FileSystem;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::command::{Command, CommandOutcome};
use crate::controller::FileOperationController;

/// Whether the worker can accept a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Ready for the next command.
    Idle,
    /// A command is running.
    Busy,
    /// The running command's task died and took the session with it.
    Stopped,
}

/// Sent back by the blocking task when a command finishes.
struct Completion<F> {
    controller: FileOperationController<F>,
    result: FileOpResult<CommandOutcome>,
}

/// Runs controller commands on the blocking thread pool, one at a time.
///
/// The controller is moved into the task for the duration of a command and
/// handed back with the result, so no lock is involved. A command submitted
/// while another one runs is refused with [`FileOpError::Busy`].
pub struct OperationWorker<F> {
    controller: Option<FileOperationController<F>>,
    in_flight: Option<(Command, mpsc::Receiver<Completion<F>>)>,
}

impl<F> OperationWorker<F>
where
    F: FileSystem + Send + 'static,
{
    /// Wrap a controller.
    pub fn new(controller: FileOperationController<F>) -> Self {
        Self {
            controller: Some(controller),
            in_flight: None,
        }
    }

    /// Current worker state.
    pub fn state(&self) -> WorkerState {
        match (&self.controller, &self.in_flight) {
            (Some(_), _) => WorkerState::Idle,
            (None, Some(_)) => WorkerState::Busy,
            (None, None) => WorkerState::Stopped,
        }
    }

    /// Check if a command is running.
    pub fn is_busy(&self) -> bool {
        self.state() == WorkerState::Busy
    }

    /// The controller, while the worker is idle.
    pub fn controller(&self) -> Option<&FileOperationController<F>> {
        self.controller.as_ref()
    }

    /// Mutable access to the controller, while the worker is idle.
    pub fn controller_mut(&mut self) -> Option<&mut FileOperationController<F>> {
        self.controller.as_mut()
    }

    /// The command currently running, if any.
    pub fn in_flight(&self) -> Option<&Command> {
        self.in_flight.as_ref().map(|(command, _)| command)
    }

    /// Start a command in the background.
    pub fn submit(&mut self, command: Command) -> FileOpResult<()> {
        let Some(mut controller) = self.controller.take() else {
            return Err(match self.state() {
                WorkerState::Stopped => FileOpError::WorkerStopped,
                _ => FileOpError::Busy,
            });
        };

        debug!(?command, "submitting command");
        let (tx, rx) = mpsc::channel(1);
        let task_command = command.clone();

        tokio::task::spawn_blocking(move || {
            let result = controller.execute(task_command);
            let _ = tx.blocking_send(Completion { controller, result });
        });

        self.in_flight = Some((command, rx));
        Ok(())
    }

    /// Collect a finished command without waiting.
    ///
    /// Returns `None` while the command is still running or when nothing was
    /// submitted.
    pub fn try_complete(&mut self) -> Option<FileOpResult<CommandOutcome>> {
        let (_, rx) = self.in_flight.as_mut()?;
        let received = rx.try_recv();
        match received {
            Ok(completion) => Some(self.finish(completion)),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => Some(self.lose()),
        }
    }

    /// Wait for the running command to finish.
    ///
    /// Returns `None` when nothing was submitted.
    pub async fn wait(&mut self) -> Option<FileOpResult<CommandOutcome>> {
        let (_, rx) = self.in_flight.as_mut()?;
        let received = rx.recv().await;
        match received {
            Some(completion) => Some(self.finish(completion)),
            None => Some(self.lose()),
        }
    }

    /// Submit a command and wait for its outcome.
    pub async fn run(&mut self, command: Command) -> FileOpResult<CommandOutcome> {
        self.submit(command)?;
        self.wait().await.unwrap_or(Err(FileOpError::WorkerStopped))
    }

    /// Take the controller back, if the worker is idle.
    pub fn into_controller(self) -> Option<FileOperationController<F>> {
        self.controller
    }

    fn finish(&mut self, completion: Completion<F>) -> FileOpResult<CommandOutcome> {
        self.in_flight = None;
        self.controller = Some(completion.controller);
        completion.result
    }

    fn lose(&mut self) -> FileOpResult<CommandOutcome> {
        if let Some((command, _)) = self.in_flight.take() {
            error!(?command, "operation task ended without reporting back");
        }
        Err(FileOpError::WorkerStopped)
    }
}

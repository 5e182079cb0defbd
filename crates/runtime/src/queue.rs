//! Single-flight FIFO executor for world-mutating commands.
//!
//! Receives boxed tasks from [`CommandQueue::enqueue`], runs them strictly
//! one at a time in submission order, and logs task failures without
//! halting the stream. There is no priority, cancellation, or timeout: a
//! submitted task always eventually runs exactly once.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::{Result, RuntimeError};

type TaskFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// One opaque unit of externally visible work.
///
/// Identity is submission order only; the label exists for log lines.
pub struct CommandTask {
    label: String,
    future: TaskFuture,
}

impl CommandTask {
    pub fn new(
        label: impl Into<String>,
        future: impl Future<Output = Result<()>> + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            future: Box::pin(future),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Cloneable submission handle to the queue worker.
#[derive(Clone)]
pub struct CommandQueue {
    task_tx: mpsc::UnboundedSender<CommandTask>,
}

impl CommandQueue {
    /// Spawn the worker and return the submission handle plus its join
    /// handle. The worker exits once every handle is dropped and the
    /// backlog is drained.
    pub fn start() -> (Self, JoinHandle<()>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let worker = QueueWorker { task_rx };
        let join = tokio::spawn(worker.run());
        (Self { task_tx }, join)
    }

    /// Append a task and return immediately.
    ///
    /// The task runs after every previously enqueued task has completed,
    /// successfully or not.
    pub fn enqueue(&self, task: CommandTask) -> Result<()> {
        self.task_tx
            .send(task)
            .map_err(|_| RuntimeError::QueueChannelClosed)
    }
}

/// Background task draining the queue one command at a time.
struct QueueWorker {
    task_rx: mpsc::UnboundedReceiver<CommandTask>,
}

impl QueueWorker {
    async fn run(mut self) {
        while let Some(task) = self.task_rx.recv().await {
            debug!(command = %task.label, "executing queued command");
            if let Err(err) = task.future.await {
                // Task errors stop here: the queue keeps draining.
                error!(command = %task.label, error = %err, "queued command failed");
            }
        }
    }
}

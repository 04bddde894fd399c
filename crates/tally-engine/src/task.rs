//! # Task Channel
//!
//! FIFO of work items from any controller thread to the single worker.
//!
//! ## Message Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Controller(s)                                       Worker (1)         │
//! │                                                                         │
//! │  TaskSender ──► [ Calculate | Calculate | Stop ] ──► TaskReceiver       │
//! │  (Clone)             strict arrival order             (owned)           │
//! │                                                                         │
//! │  Calculate  recompute totals from the order as it is at dequeue time   │
//! │  Stop       leave the run loop                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The channel is unbounded so `send` never blocks the controller.

use std::fmt;

use tokio::sync::mpsc;

use crate::error::{EngineError, EngineResult};

/// A unit of work for the calculation worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Recompute totals and publish them.
    Calculate,
    /// Exit the worker loop.
    Stop,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Calculate => write!(f, "calculate"),
            Task::Stop => write!(f, "stop"),
        }
    }
}

/// Creates a connected sender/receiver pair.
pub fn task_channel() -> (TaskSender, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TaskSender { tx }, TaskReceiver { rx })
}

/// Producer end. Clone it for every controller that needs to enqueue work.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<Task>,
}

impl TaskSender {
    /// Enqueues a task. Fails only once the worker has dropped its receiver.
    pub fn send(&self, task: Task) -> EngineResult<()> {
        self.tx.send(task).map_err(|_| EngineError::ChannelClosed)
    }

    /// Enqueues [`Task::Calculate`].
    pub fn calculate(&self) -> EngineResult<()> {
        self.send(Task::Calculate)
    }

    /// Enqueues [`Task::Stop`].
    pub fn stop(&self) -> EngineResult<()> {
        self.send(Task::Stop)
    }
}

/// Consumer end, owned by the worker.
#[derive(Debug)]
pub struct TaskReceiver {
    rx: mpsc::UnboundedReceiver<Task>,
}

impl TaskReceiver {
    /// Waits for the next task. `None` means every sender was dropped.
    pub async fn recv(&mut self) -> Option<Task> {
        self.rx.recv().await
    }
}

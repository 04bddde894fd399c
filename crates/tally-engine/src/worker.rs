//! # Calculation Worker
//!
//! The single long-lived task that turns `Calculate` requests into
//! published totals.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   spawn()                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ┌─────────┐  Calculate: snapshot → totals → publish → log              │
//! │  │ Running │◄──────────────────────────────┐                            │
//! │  └────┬────┘───────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │  Stop dequeued                                                  │
//! │       │  channel closed (every sender dropped)                          │
//! │       │  wait timed out AND shutdown flag set                           │
//! │       ▼                                                                 │
//! │  ┌──────────┐        ┌─────────┐                                        │
//! │  │ Stopping │───────►│ Stopped │                                        │
//! │  └──────────┘        └─────────┘                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shutdown
//! Two mechanisms, both kept:
//! - `Stop` on the channel wakes the worker immediately and, being FIFO,
//!   lets every `Calculate` queued before it finish first.
//! - The [`ShutdownSignal`] flag is checked whenever a wait on the channel
//!   runs out, so the worker also exits when no `Stop` ever arrives.
//!
//! [`WorkerHandle::shutdown`] uses both, then joins with a bounded wait. A
//! join that times out is reported, not treated as fatal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tally_core::OrderTotals;

use crate::config::WorkerConfig;
use crate::error::EngineResult;
use crate::order::OrderState;
use crate::results::ResultStore;
use crate::task::{Task, TaskReceiver, TaskSender};

// =============================================================================
// Worker State
// =============================================================================

/// Lifecycle of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Stopping,
    Stopped,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Running => write!(f, "running"),
            WorkerState::Stopping => write!(f, "stopping"),
            WorkerState::Stopped => write!(f, "stopped"),
        }
    }
}

#[derive(Debug, Clone)]
struct SharedState(Arc<RwLock<WorkerState>>);

impl SharedState {
    fn new(state: WorkerState) -> Self {
        SharedState(Arc::new(RwLock::new(state)))
    }

    fn get(&self) -> WorkerState {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, state: WorkerState) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

/// Cooperative cancellation flag shared between controller and worker.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. The worker notices at its next wait timeout.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`trigger`](Self::trigger) was called.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Observer Trait
// =============================================================================

/// Callbacks for worker lifecycle events.
///
/// Called on the worker task, in the same order as the matching log lines.
/// Implementations must return quickly.
pub trait WorkerObserver: Send + Sync {
    /// The run loop has started.
    fn on_started(&self);

    /// A calculation finished and its totals were published.
    fn on_calculated(&self, totals: &OrderTotals);

    /// The run loop has exited.
    fn on_stopped(&self);
}

/// No-op observer for testing and headless use.
pub struct NoOpObserver;

impl WorkerObserver for NoOpObserver {
    fn on_started(&self) {}
    fn on_calculated(&self, _totals: &OrderTotals) {}
    fn on_stopped(&self) {}
}

// =============================================================================
// Calculation Worker
// =============================================================================

/// Background calculator.
///
/// Owns the receiving end of the task channel. Everything else it touches
/// is a shared handle passed in at construction.
pub struct CalculationWorker {
    order: OrderState,
    results: ResultStore,
    receiver: TaskReceiver,
    config: WorkerConfig,
    observer: Arc<dyn WorkerObserver>,
}

impl CalculationWorker {
    /// Creates a worker with a no-op observer.
    ///
    /// Fails with `InvalidConfig` if `config` does not validate. A zero poll
    /// interval would turn the run loop into a busy spin.
    pub fn new(
        order: OrderState,
        results: ResultStore,
        receiver: TaskReceiver,
        config: WorkerConfig,
    ) -> EngineResult<Self> {
        config.validate()?;

        Ok(CalculationWorker {
            order,
            results,
            receiver,
            config,
            observer: Arc::new(NoOpObserver),
        })
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: Arc<dyn WorkerObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Starts the run loop on the current tokio runtime.
    ///
    /// `sender` is kept by the handle so that [`WorkerHandle::shutdown`] can
    /// enqueue `Stop`.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime context.
    pub fn spawn(self, sender: TaskSender) -> WorkerHandle {
        let state = SharedState::new(WorkerState::Running);
        let signal = ShutdownSignal::new();

        let join = tokio::spawn(self.run(state.clone(), signal.clone()));

        WorkerHandle {
            state,
            signal,
            sender,
            join,
        }
    }

    async fn run(mut self, state: SharedState, signal: ShutdownSignal) {
        let poll = self.config.poll_interval();

        info!(poll_interval_ms = self.config.poll_interval_ms, "Worker started");
        self.observer.on_started();

        loop {
            match tokio::time::timeout(poll, self.receiver.recv()).await {
                Ok(Some(Task::Calculate)) => self.calculate(),
                Ok(Some(Task::Stop)) => {
                    debug!("Stop task received");
                    break;
                }
                Ok(None) => {
                    debug!("Task channel closed");
                    break;
                }
                Err(_) => {
                    if signal.is_triggered() {
                        debug!("Shutdown flag observed");
                        break;
                    }
                }
            }
        }

        state.set(WorkerState::Stopping);
        // Dropping the receiver here means any task sent from now on fails
        // with ChannelClosed instead of sitting in a dead queue.
        drop(self.receiver);

        info!("Worker stopped");
        self.observer.on_stopped();
        state.set(WorkerState::Stopped);
    }

    fn calculate(&self) {
        let items = self.order.snapshot();
        let totals = OrderTotals::from_items(&items);
        self.results.publish(totals);

        info!(
            items = items.len(),
            "Calculated totals: subtotal={:.2}, vat={:.2}, total={:.2}",
            totals.subtotal,
            totals.vat,
            totals.total
        );
        self.observer.on_calculated(&totals);
    }
}

// =============================================================================
// Worker Handle
// =============================================================================

/// How a bounded join ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The worker exited within the timeout.
    Joined,
    /// The timeout elapsed first. The worker is left to finish on its own.
    TimedOut,
    /// The worker task panicked or was aborted.
    Panicked,
}

/// Controller-side handle to a spawned worker.
pub struct WorkerHandle {
    state: SharedState,
    signal: ShutdownSignal,
    sender: TaskSender,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    /// Returns the current lifecycle state.
    pub fn state(&self) -> WorkerState {
        self.state.get()
    }

    /// Returns the cancellation flag, for callers that want to signal
    /// without sending `Stop`.
    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Waits at most `timeout` for the worker to exit.
    pub async fn join(self, timeout: Duration) -> ShutdownOutcome {
        match tokio::time::timeout(timeout, self.join).await {
            Ok(Ok(())) => ShutdownOutcome::Joined,
            Ok(Err(e)) => {
                warn!(error = %e, "Worker task ended abnormally");
                ShutdownOutcome::Panicked
            }
            Err(_) => {
                warn!(?timeout, "Worker did not stop in time");
                ShutdownOutcome::TimedOut
            }
        }
    }

    /// Sets the shutdown flag, enqueues `Stop` and joins with `timeout`.
    ///
    /// Tasks queued before this call are still processed.
    pub async fn shutdown(self, timeout: Duration) -> ShutdownOutcome {
        info!("Shutting down worker");
        self.signal.trigger();

        // Already gone is fine: the join below returns at once.
        if self.sender.stop().is_err() {
            debug!("Worker already closed its task channel");
        }

        self.join(timeout).await
    }
}

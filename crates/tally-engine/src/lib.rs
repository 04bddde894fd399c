//! # tally-engine: Background Calculation for Tally
//!
//! Keeps order totals off the controller thread. The controller mutates the
//! order and enqueues tasks; one worker drains the tasks and publishes
//! totals; the controller reads them back whenever it likes.
//!
//! ## Roles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Controller thread(s)                         Worker task (exactly 1)   │
//! │  ────────────────────                         ───────────────────────   │
//! │                                                                         │
//! │  OrderState::add_item ──┐                                               │
//! │  OrderState::replace  ──┼──► OrderState ◄─── snapshot() ──┐             │
//! │  OrderState::set_name ──┘    (Mutex)                      │             │
//! │                                                           │             │
//! │  TaskSender::calculate ────► TaskChannel ───► recv() ─────┤             │
//! │  TaskSender::stop            (FIFO)                       │             │
//! │                                                           ▼             │
//! │  ResultStore::read ◄──────── ResultStore ◄─── publish(totals)           │
//! │                              (watch channel)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Controllers are the only writers of the order and the only producers of
//! tasks. The worker is the only consumer of tasks and the only writer of
//! results. A `Calculate` sees the order as it is when the task is dequeued,
//! not when it was sent.
//!
//! Every handle is constructed explicitly and passed where it is needed.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tally_core::LineItem;
//! use tally_engine::{task_channel, CalculationWorker, OrderState, ResultStore, WorkerConfig};
//!
//! # #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
//! # async fn main() {
//! let order = OrderState::default();
//! let results = ResultStore::new();
//! let (tasks, receiver) = task_channel();
//!
//! let worker = CalculationWorker::new(order.clone(), results.clone(), receiver, WorkerConfig::default())
//!     .unwrap()
//!     .spawn(tasks.clone());
//!
//! order.add_item(LineItem::new("Widget", 3.0, 10.0, 21.0));
//! tasks.calculate().unwrap();
//! worker.shutdown(Duration::from_secs(1)).await;
//!
//! let totals = results.read().unwrap();
//! assert!((totals.total - 36.3).abs() < 1e-9);
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod order;
pub mod results;
pub mod task;
pub mod worker;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::WorkerConfig;
pub use error::{EngineError, EngineResult};
pub use order::OrderState;
pub use results::{ResultStore, ResultWatcher};
pub use task::{task_channel, Task, TaskReceiver, TaskSender};
pub use worker::{
    CalculationWorker, NoOpObserver, ShutdownOutcome, ShutdownSignal, WorkerHandle,
    WorkerObserver, WorkerState,
};

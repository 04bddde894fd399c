//! # State Module
//!
//! The handles every command works with, built once at startup and passed
//! in explicitly. Nothing here is a global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        AppState                                 │   │
//! │  │                                                                 │   │
//! │  │  order    OrderState   Arc<Mutex<Order>>   shared with worker   │   │
//! │  │  results  ResultStore  watch channel       written by worker    │   │
//! │  │  tasks    TaskSender   mpsc producer                            │   │
//! │  │  store    JsonStore    path to orders.json                      │   │
//! │  │  config   AppConfig    read-only after load                     │   │
//! │  │  runtime  Handle       drives waits from the menu thread        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  The worker gets clones of `order` and `results` plus the task         │
//! │  receiver. The WorkerHandle stays with `run()`, not here, so commands  │
//! │  cannot stop the worker by accident.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{AppConfig, ConfigError, DisplaySettings, LoggingSettings, StorageSettings};

use tokio::runtime::Handle;

use tally_core::DEFAULT_ORDER_NAME;
use tally_engine::{task_channel, OrderState, ResultStore, TaskReceiver, TaskSender};
use tally_store::JsonStore;

/// Shared handles used by the menu commands.
#[derive(Debug, Clone)]
pub struct AppState {
    pub order: OrderState,
    pub results: ResultStore,
    pub tasks: TaskSender,
    pub store: JsonStore,
    pub config: AppConfig,
    pub runtime: Handle,
}

impl AppState {
    /// Builds fresh state and returns the task receiver the worker will own.
    pub fn new(config: AppConfig, runtime: Handle) -> (Self, TaskReceiver) {
        let (tasks, receiver) = task_channel();
        let state = AppState {
            order: OrderState::new(DEFAULT_ORDER_NAME),
            results: ResultStore::new(),
            tasks,
            store: JsonStore::new(config.storage.orders_path.clone()),
            config,
            runtime,
        };
        (state, receiver)
    }
}

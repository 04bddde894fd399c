//! # Tally CLI Library
//!
//! Terminal front end for Tally. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! tally_cli/
//! ├── lib.rs          ◄─── You are here (startup & shutdown)
//! ├── logging.rs      ◄─── tracing subscriber, log file
//! ├── console.rs      ◄─── prints worker results to stdout
//! ├── menu.rs         ◄─── menu loop
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (shared handles)
//! │   └── config.rs   ◄─── AppConfig (tally.toml + TALLY_* env)
//! ├── commands/
//! │   ├── order.rs    ◄─── name, add, list
//! │   ├── calc.rs     ◄─── calculate, show result
//! │   └── storage.rs  ◄─── save, load
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! ## Threads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main thread                          tokio runtime (1 worker thread)  │
//! │  ───────────                          ─────────────────────────────── │
//! │  run_menu() blocking on stdin         CalculationWorker::run()         │
//! │      │                                    ▲                            │
//! │      └── TaskSender ── Calculate ─────────┘                            │
//! │                                                                         │
//! │  on exit: runtime.block_on(handle.shutdown(join_timeout))              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod logging;
pub mod menu;
pub mod state;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, warn};

use tally_engine::{CalculationWorker, ShutdownOutcome};

use console::ConsoleObserver;
use error::{AppError, AppResult};
use logging::LogTarget;
use state::{AppConfig, AppState};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Build an order of priced items and compute subtotal, VAT and total")]
#[command(version)]
pub struct Args {
    /// Path to a tally.toml config file
    #[arg(long, short, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Runs the application until the user exits.
///
/// ## Startup Sequence
/// ```text
/// 1. Parse arguments, load config (defaults on failure)
/// 2. Install logging (file, else stderr)
/// 3. Build AppState and spawn the worker on a tokio runtime
/// 4. Menu loop on this thread
/// 5. Shutdown: flag + Stop + bounded join, never fatal
/// ```
pub fn run() -> AppResult<()> {
    let args = Args::parse();

    let (config, config_error) = AppConfig::load_or_default(args.config);

    // the stderr fallback already printed its own warning
    if let LogTarget::File(path) = logging::init_logging(&config.logging) {
        debug!(path = %path.display(), "Logging to file");
    }
    if let Some(e) = config_error {
        warn!("Failed to load config: {}. Using defaults.", e);
        eprintln!("Warning: {}. Using default settings.", e);
    }

    info!("Application started");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("tally-worker")
        .enable_all()
        .build()
        .map_err(|e| AppError::internal(format!("Failed to start runtime: {}", e)))?;

    let (state, receiver) = AppState::new(config, runtime.handle().clone());

    let worker = {
        let _guard = runtime.enter();
        CalculationWorker::new(
            state.order.clone(),
            state.results.clone(),
            receiver,
            state.config.worker.clone(),
        )?
        .with_observer(Arc::new(ConsoleObserver))
        .spawn(state.tasks.clone())
    };

    let stdin = io::stdin();
    if let Err(e) = menu::run_menu(&state, stdin.lock(), io::stdout()) {
        error!(error = %e, "Terminal I/O failed, shutting down");
    }

    info!(worker = %worker.state(), "Application closing requested");
    let outcome = runtime.block_on(worker.shutdown(state.config.worker.join_timeout()));
    match outcome {
        ShutdownOutcome::Joined => info!("Worker joined"),
        ShutdownOutcome::TimedOut | ShutdownOutcome::Panicked => {
            warn!(?outcome, "Worker did not shut down cleanly")
        }
    }

    runtime.shutdown_timeout(Duration::from_millis(100));
    info!("Application closed");
    Ok(())
}

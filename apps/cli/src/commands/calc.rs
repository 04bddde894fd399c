//! # Calculation Commands
//!
//! ```text
//! calculate()                              worker
//! ───────────                              ──────
//! results.subscribe()
//! tasks.calculate() ──── Calculate ──────► snapshot, compute
//! watcher.changed(result_wait) ◄────────── publish
//!   │
//!   ├─ newer result in time ──► Some(totals)
//!   └─ timed out ─────────────► None ("calculating in worker...")
//! ```
//!
//! The wait is a convenience for the menu. The worker publishes whether
//! or not anybody is still waiting, and `show_result` picks it up later.

use std::time::Duration;

use tokio::runtime::Handle;
use tracing::info;

use tally_core::OrderTotals;
use tally_engine::{ResultStore, TaskSender};

use crate::error::AppResult;

/// Text shown before the first calculation.
pub const NO_RESULT: &str = "Result: (no calculation yet)";

/// Text shown while the worker has not published yet.
pub const PENDING: &str = "Result: calculating in worker thread...";

/// Enqueues a calculation and waits up to `wait` for its result.
///
/// Returns `Ok(None)` when the worker has not published within `wait`.
/// Must not be called from inside the runtime.
pub fn calculate(
    runtime: &Handle,
    tasks: &TaskSender,
    results: &ResultStore,
    wait: Duration,
) -> AppResult<Option<OrderTotals>> {
    let mut watcher = results.subscribe();
    tasks.calculate()?;
    info!("Calculation task sent");

    Ok(runtime.block_on(watcher.changed(wait)))
}

/// Formats totals to two decimals, or the "no calculation yet" text.
pub fn format_result(totals: Option<OrderTotals>) -> String {
    match totals {
        Some(t) => format!(
            "Result: Subtotal={:.2} | VAT={:.2} | Total={:.2}",
            t.subtotal, t.vat, t.total
        ),
        None => NO_RESULT.to_string(),
    }
}

/// Returns the display text for the latest published result.
pub fn show_result(results: &ResultStore) -> String {
    format_result(results.read())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::LineItem;
    use tally_engine::{task_channel, CalculationWorker, OrderState, WorkerConfig};

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(None), NO_RESULT);

        let totals = OrderTotals {
            subtotal: 30.0,
            vat: 6.3,
            total: 36.3,
        };
        assert_eq!(
            format_result(Some(totals)),
            "Result: Subtotal=30.00 | VAT=6.30 | Total=36.30"
        );
    }

    #[test]
    fn test_calculate_waits_for_worker() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let order = OrderState::default();
        let results = ResultStore::new();
        let (tasks, receiver) = task_channel();
        let worker = {
            let _guard = runtime.enter();
            let config = WorkerConfig::default();
            CalculationWorker::new(order.clone(), results.clone(), receiver, config)
                .unwrap()
                .spawn(tasks.clone())
        };

        order.add_item(LineItem::new("Widget", 3.0, 10.0, 21.0));
        assert_eq!(show_result(&results), NO_RESULT);

        let totals = calculate(runtime.handle(), &tasks, &results, Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert!((totals.total - 36.3).abs() < 1e-9);
        assert_eq!(show_result(&results), "Result: Subtotal=30.00 | VAT=6.30 | Total=36.30");

        runtime.block_on(worker.shutdown(Duration::from_secs(1)));
    }

    #[test]
    fn test_calculate_without_worker_is_an_error() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let results = ResultStore::new();
        let (tasks, receiver) = task_channel();
        drop(receiver);

        let err = calculate(runtime.handle(), &tasks, &results, Duration::from_millis(1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkerUnavailable);
    }
}

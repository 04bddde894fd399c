//! # Result Store
//!
//! Holds the most recent calculation result. Written only by the worker,
//! read by any controller thread.
//!
//! ## States
//! ```text
//!   ┌──────────┐  publish   ┌──────────────────────┐  publish
//!   │  Empty   │───────────►│ Present              │──────────► Present (replaced)
//!   │ read()=  │            │ read()=Some(totals)  │            (no history kept)
//!   │   None   │            └──────────────────────┘
//!   └──────────┘
//! ```
//!
//! Backed by a `watch` channel. The three totals are one value behind the
//! channel's lock, so a reader can never pair the subtotal of one
//! calculation with the VAT of another.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use tally_core::OrderTotals;

/// Shared handle to the last published totals.
#[derive(Debug, Clone)]
pub struct ResultStore {
    tx: Arc<watch::Sender<Option<OrderTotals>>>,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        ResultStore { tx: Arc::new(tx) }
    }

    /// Replaces the stored totals and wakes every watcher.
    pub fn publish(&self, totals: OrderTotals) {
        self.tx.send_replace(Some(totals));
    }

    /// Returns the latest totals, or `None` before the first calculation.
    pub fn read(&self) -> Option<OrderTotals> {
        *self.tx.borrow()
    }

    /// Returns a watcher that only reports results published after this call.
    pub fn subscribe(&self) -> ResultWatcher {
        ResultWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

/// Waits for results newer than the ones already seen.
#[derive(Debug)]
pub struct ResultWatcher {
    rx: watch::Receiver<Option<OrderTotals>>,
}

impl ResultWatcher {
    /// Waits at most `timeout` for the next publish.
    ///
    /// Returns the newest totals, or `None` on timeout. Several publishes
    /// in between collapse into the latest one.
    pub async fn changed(&mut self, timeout: Duration) -> Option<OrderTotals> {
        match tokio::time::timeout(timeout, self.rx.changed()).await {
            Ok(Ok(())) => *self.rx.borrow_and_update(),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    fn totals(subtotal: f64, vat: f64) -> OrderTotals {
        OrderTotals {
            subtotal,
            vat,
            total: subtotal + vat,
        }
    }

    #[test]
    fn test_empty_before_first_publish() {
        let store = ResultStore::new();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_publish_replaces_previous() {
        let store = ResultStore::new();
        store.publish(totals(10.0, 2.0));
        store.publish(totals(20.0, 4.0));

        assert_eq!(store.read(), Some(totals(20.0, 4.0)));
    }

    #[tokio::test]
    async fn test_watcher_times_out_without_publish() {
        let store = ResultStore::new();
        let mut watcher = store.subscribe();
        let started = Instant::now();

        assert_eq!(watcher.changed(Duration::from_millis(30)).await, None);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_watcher_ignores_results_published_before_subscribe() {
        let store = ResultStore::new();
        store.publish(totals(1.0, 0.0));

        let mut watcher = store.subscribe();
        assert_eq!(watcher.changed(Duration::from_millis(20)).await, None);

        store.publish(totals(2.0, 0.0));
        assert_eq!(
            watcher.changed(Duration::from_millis(20)).await,
            Some(totals(2.0, 0.0))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_watcher_wakes_on_publish_from_another_thread() {
        let store = ResultStore::new();
        let mut watcher = store.subscribe();
        let publisher = {
            let store = store.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                store.publish(totals(5.0, 1.0));
            })
        };

        let got = watcher.changed(Duration::from_secs(5)).await;
        publisher.join().unwrap();

        assert_eq!(got, Some(totals(5.0, 1.0)));
    }

    #[test]
    fn test_readers_never_see_torn_triples() {
        let store = ResultStore::new();
        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..2000 {
                    let x = i as f64;
                    store.publish(totals(x, x * 2.0));
                }
            })
        };

        for _ in 0..2000 {
            if let Some(t) = store.read() {
                assert_eq!(t.vat, t.subtotal * 2.0);
                assert_eq!(t.total, t.subtotal + t.vat);
            }
        }

        writer.join().unwrap();
    }
}

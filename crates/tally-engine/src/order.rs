//! # Order State
//!
//! The one live order of the process: a name and an ordered list of items.
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<T>>` because:
//! 1. The controller thread appends and replaces items
//! 2. The worker reads the items while the controller keeps working
//! 3. A reader must never see half of a mutation
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Operations                               │
//! │                                                                         │
//! │  Caller                   Method               State Change             │
//! │  ──────                   ──────               ────────────             │
//! │                                                                         │
//! │  Controller ────────────► set_name() ────────► name = trimmed/"Order"  │
//! │                                                                         │
//! │  Controller ────────────► add_item() ────────► items.push(item)        │
//! │                                                                         │
//! │  Controller (load) ─────► replace() ─────────► items = new list        │
//! │                           restore() ─────────► name + items together   │
//! │                                                                         │
//! │  Worker / Controller ───► snapshot() ────────► (copy, lock released)   │
//! │                                                                         │
//! │  NOTE: Every method holds the lock only for one assignment or one      │
//! │        copy. Callers iterate and compute on the returned copy.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::validation::normalize_order_name;
use tally_core::{LineItem, OrderRecord, DEFAULT_ORDER_NAME};

#[derive(Debug)]
struct Order {
    name: String,
    items: Vec<LineItem>,
}

/// Shared handle to the live order.
///
/// Cloning the handle shares the same order. Reads hand out owned copies and
/// writes take ownership of their input, so no caller ever holds a reference
/// into the guarded data.
#[derive(Debug, Clone)]
pub struct OrderState {
    order: Arc<Mutex<Order>>,
}

impl OrderState {
    /// Creates an empty order with the given name (blank → `"Order"`).
    pub fn new(name: &str) -> Self {
        OrderState {
            order: Arc::new(Mutex::new(Order {
                name: normalize_order_name(name),
                items: Vec::new(),
            })),
        }
    }

    // A panic elsewhere cannot leave `Order` half-written: every critical
    // section is a single push, assignment or clone.
    fn lock(&self) -> MutexGuard<'_, Order> {
        self.order.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the order name, trimmed, `"Order"` when blank.
    pub fn set_name(&self, name: &str) {
        let name = normalize_order_name(name);
        self.lock().name = name;
    }

    /// Returns the current order name.
    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    /// Appends one item.
    pub fn add_item(&self, item: LineItem) {
        self.lock().items.push(item);
    }

    /// Returns an independent copy of the items in insertion order.
    ///
    /// The lock is released before this returns, so iterating over the copy
    /// never blocks a concurrent `add_item`.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.lock().items.clone()
    }

    /// Swaps in a whole new item list. The old list is dropped, not merged.
    pub fn replace(&self, items: Vec<LineItem>) {
        let old = std::mem::replace(&mut self.lock().items, items);
        // freed outside the lock
        drop(old);
    }

    /// Returns the name and items as one consistent record.
    pub fn record(&self) -> OrderRecord {
        let order = self.lock();
        OrderRecord {
            order_name: order.name.clone(),
            items: order.items.clone(),
            saved_at: None,
        }
    }

    /// Replaces name and items together, as used by load.
    pub fn restore(&self, record: OrderRecord) {
        let name = normalize_order_name(&record.order_name);
        let mut order = self.lock();
        order.name = name;
        order.items = record.items;
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Checks if the order has no items.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }
}

impl Default for OrderState {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn item(name: &str, price: f64) -> LineItem {
        LineItem::new(name, 1.0, price, 0.0)
    }

    #[test]
    fn test_new_order_defaults() {
        let order = OrderState::new("   ");
        assert_eq!(order.name(), "Order");
        assert!(order.is_empty());
        assert!(order.snapshot().is_empty());
    }

    #[test]
    fn test_set_name_trims_and_defaults() {
        let order = OrderState::default();

        order.set_name("  Lunch  ");
        assert_eq!(order.name(), "Lunch");

        order.set_name("");
        assert_eq!(order.name(), "Order");
    }

    #[test]
    fn test_snapshot_preserves_append_order() {
        let order = OrderState::default();
        let names = ["a", "b", "a", "c"];
        for (i, name) in names.iter().enumerate() {
            order.add_item(item(name, i as f64));
        }

        let snapshot = order.snapshot();
        assert_eq!(snapshot.len(), names.len());
        let got: Vec<&str> = snapshot.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let order = OrderState::default();
        order.add_item(item("a", 1.0));

        let snapshot = order.snapshot();
        order.add_item(item("b", 2.0));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_replace_discards_previous_items() {
        let order = OrderState::default();
        order.add_item(item("old-1", 1.0));
        order.add_item(item("old-2", 2.0));

        let fresh = vec![item("new", 3.0)];
        order.replace(fresh.clone());

        assert_eq!(order.snapshot(), fresh);
    }

    #[test]
    fn test_record_and_restore() {
        let order = OrderState::new("Before");
        order.add_item(item("a", 1.0));

        let mut record = order.record();
        assert_eq!(record.order_name, "Before");
        assert_eq!(record.items.len(), 1);

        record.order_name = " ".to_string();
        record.items = vec![item("x", 1.0), item("y", 2.0)];
        order.restore(record);

        assert_eq!(order.name(), "Order");
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let order = OrderState::default();
        let writers: Vec<_> = (0..4)
            .map(|t| {
                let order = order.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        order.add_item(item(&format!("{}-{}", t, i), 1.0));
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(order.len(), 1000);
    }

    #[test]
    fn test_snapshots_never_mix_old_and_new_lists() {
        let order = OrderState::default();
        let old: Vec<LineItem> = (0..50).map(|_| item("old", 1.0)).collect();
        let new: Vec<LineItem> = (0..10).map(|_| item("new", 2.0)).collect();
        order.replace(old.clone());

        let writer = {
            let order = order.clone();
            let (old, new) = (old.clone(), new.clone());
            thread::spawn(move || {
                for i in 0..200 {
                    order.replace(if i % 2 == 0 { new.clone() } else { old.clone() });
                }
            })
        };

        for _ in 0..200 {
            let snapshot = order.snapshot();
            assert!(snapshot == old || snapshot == new);
        }

        writer.join().unwrap();
    }
}

//! # Storage Commands
//!
//! Save and load the live order as JSON.
//!
//! Load fails soft: any error is logged as a warning and returned, and the
//! live order stays exactly as it was.

use std::path::PathBuf;

use tracing::warn;

use tally_engine::OrderState;
use tally_store::JsonStore;

use crate::error::AppResult;

/// What a successful load brought in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub order_name: String,
    pub item_count: usize,
}

/// Writes the current order to the store's file and returns its path.
pub fn save(order: &OrderState, store: &JsonStore) -> AppResult<PathBuf> {
    let record = order.record();
    store.save(&record).map_err(|e| {
        warn!(path = %store.path().display(), error = %e, "Order save failed");
        e
    })?;
    Ok(store.path().to_path_buf())
}

/// Replaces the current order with the stored one.
pub fn load(order: &OrderState, store: &JsonStore) -> AppResult<Loaded> {
    let record = store.load().map_err(|e| {
        warn!(
            path = %store.path().display(),
            error = %e,
            "Order load failed, keeping current order"
        );
        e
    })?;

    let loaded = Loaded {
        order_name: record.order_name.clone(),
        item_count: record.items.len(),
    };
    order.restore(record);
    Ok(loaded)
}

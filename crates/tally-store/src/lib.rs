//! # tally-store: Persistence Layer for Tally
//!
//! This crate saves and loads orders as JSON files. It is a collaborator of
//! the engine, not part of it: the controller takes a record from the order
//! state, hands it here, and on load hands the decoded record back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Controller (save / load menu entries)                                 │
//! │       │  OrderState::record() / OrderState::restore()                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐       ┌─────────────────────────┐     │   │
//! │  │   │  json.rs           │       │  JsonStore              │     │   │
//! │  │   │  to_json_bytes     │◄──────│  save (temp + rename)   │     │   │
//! │  │   │  from_json_bytes   │       │  load                   │     │   │
//! │  │   └────────────────────┘       └─────────────────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   data/orders.json                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Every failure is returned as a [`StoreError`]. Nothing here touches the
//! live order, so a failed load leaves it exactly as it was.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tally_core::{LineItem, OrderRecord};
//! use tally_store::JsonStore;
//!
//! let store = JsonStore::new("data/orders.json");
//! let record = OrderRecord::new("Order", vec![LineItem::new("Pen", 2.0, 1.5, 21.0)]);
//! store.save(&record)?;
//!
//! let loaded = store.load()?;
//! assert_eq!(loaded.items.len(), 1);
//! # Ok::<(), tally_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json::{from_json_bytes, to_json_bytes, JsonStore};

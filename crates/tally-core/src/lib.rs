//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the order math and input
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (Controller)                        │   │
//! │  │    menu ──► commands ──► OrderState / TaskSender / ResultStore  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          tally-engine (worker)  │  tally-store (JSON)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌──────────────┐  ┌──────────────┐           │   │
//! │  │   │   types    │  │  validation  │  │    error     │           │   │
//! │  │   │  LineItem  │  │ parse_amount │  │ CoreError    │           │   │
//! │  │   │ OrderTotals│  │ normalize_*  │  │ Validation   │           │   │
//! │  │   │ OrderRecord│  │              │  │   Error      │           │   │
//! │  │   └────────────┘  └──────────────┘  └──────────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO THREADS • NO FILES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, OrderTotals, OrderRecord)
//! - [`error`] - Domain error types
//! - [`validation`] - Controller-boundary input validation
//!
//! ## Numeric Semantics
//!
//! Amounts are plain `f64`. No rounding happens here; rounding to two
//! decimals is a presentation concern of whoever displays the totals.
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{LineItem, OrderTotals};
//!
//! let item = LineItem::new("Widget", 3.0, 10.0, 21.0);
//! assert_eq!(item.subtotal_without_vat(), 30.0);
//! assert!((item.vat_amount() - 6.3).abs() < 1e-9);
//!
//! let totals = OrderTotals::from_items(&[item]);
//! assert!((totals.total - 36.3).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Order name used when the user leaves the name blank.
pub const DEFAULT_ORDER_NAME: &str = "Order";

/// Item name used when the user leaves the name blank.
pub const DEFAULT_ITEM_NAME: &str = "Item";

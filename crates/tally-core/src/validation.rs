//! # Validation Module
//!
//! Input validation utilities for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Controller (apps/cli)                                        │
//! │  ├── Raw text from the terminal                                        │
//! │  └── THIS MODULE: parse + range checks → LineItem                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: OrderState (tally-engine)                                    │
//! │  └── Only ever sees validated items; performs no checks                │
//! │                                                                         │
//! │  Side door: tally-store                                                │
//! │  └── Records loaded from disk are re-checked with validate_line_item   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{parse_amount, normalize_order_name};
//!
//! assert_eq!(parse_amount("unit_price", "12,50").unwrap(), 12.5);
//! assert!(parse_amount("quantity", "-3").is_err());
//! assert_eq!(normalize_order_name("  "), "Order");
//! ```

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::{DEFAULT_ITEM_NAME, DEFAULT_ORDER_NAME};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Normalizers
// =============================================================================

/// Trims an order name, substituting `"Order"` when nothing is left.
pub fn normalize_order_name(name: &str) -> String {
    normalize_or(name, DEFAULT_ORDER_NAME)
}

/// Trims an item name, substituting `"Item"` when nothing is left.
pub fn normalize_item_name(name: &str) -> String {
    normalize_or(name, DEFAULT_ITEM_NAME)
}

fn normalize_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a non-negative decimal amount typed by a user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - `,` is accepted as the decimal separator (`"3,5"` == `"3.5"`)
/// - Empty input is `Required`
/// - Must parse as a finite number
/// - Must be `>= 0`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Menu: Add Item                                                         │
/// │                                                                         │
/// │  Unit price: 12,50                                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_amount("unit_price", "12,50") ← THIS FUNCTION                   │
/// │       │                                                                 │
/// │       ├── not a number? → "unit_price must be a number"                │
/// │       ├── negative?     → "unit_price must be >= 0"                    │
/// │       └── OK → 12.5                                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field: field.to_string(),
            input: trimmed.to_string(),
        })?;

    validate_amount(field, value)
}

/// Checks that an already-numeric amount is finite and non-negative.
pub fn validate_amount(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Checks every numeric field of an item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_amount("quantity", item.quantity)?;
    validate_amount("unit_price", item.unit_price)?;
    validate_amount("vat_rate", item.vat_rate)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

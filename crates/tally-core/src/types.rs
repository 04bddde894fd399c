//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   OrderTotals   │   │   OrderRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  subtotal       │   │  order_name     │       │
//! │  │  quantity       │──►│  vat            │   │  items          │       │
//! │  │  unit_price     │   │  total          │   │  saved_at       │       │
//! │  │  vat_rate (%)   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A line item has no identity beyond its position in the order. Two items
//! with the same name are two separate lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation;

// =============================================================================
// Line Item
// =============================================================================

/// One priced order line.
///
/// Immutable once added to an order: the order appends items and replaces
/// the whole sequence on load, it never edits an item in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name.
    pub name: String,

    /// Quantity ordered (fractional quantities allowed, e.g. 1.5 kg).
    pub quantity: f64,

    /// Price of one unit, VAT excluded.
    pub unit_price: f64,

    /// VAT rate in percent (21 = 21%).
    pub vat_rate: f64,
}

impl LineItem {
    /// Creates a line item from already-validated values.
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64, vat_rate: f64) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
            vat_rate,
        }
    }

    /// Builds a line item from raw user text.
    ///
    /// ## Rules
    /// - Blank name becomes `"Item"`
    /// - Numbers accept `,` as the decimal separator
    /// - Quantity, price and VAT must be finite and `>= 0`
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::LineItem;
    ///
    /// let item = LineItem::from_input(" Coffee ", "2", "3,50", "15").unwrap();
    /// assert_eq!(item.name, "Coffee");
    /// assert_eq!(item.unit_price, 3.5);
    ///
    /// assert!(LineItem::from_input("Tea", "-1", "2", "15").is_err());
    /// ```
    pub fn from_input(
        name: &str,
        quantity: &str,
        unit_price: &str,
        vat_rate: &str,
    ) -> Result<Self, ValidationError> {
        Ok(LineItem {
            name: validation::normalize_item_name(name),
            quantity: validation::parse_amount("quantity", quantity)?,
            unit_price: validation::parse_amount("unit_price", unit_price)?,
            vat_rate: validation::parse_amount("vat_rate", vat_rate)?,
        })
    }

    /// Returns `quantity × unit_price`.
    #[inline]
    pub fn subtotal_without_vat(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Returns `subtotal × vat_rate / 100`.
    #[inline]
    pub fn vat_amount(&self) -> f64 {
        self.subtotal_without_vat() * (self.vat_rate / 100.0)
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The result of one calculation over an order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of all line subtotals, VAT excluded.
    pub subtotal: f64,
    /// Sum of all line VAT amounts.
    pub vat: f64,
    /// `subtotal + vat`.
    pub total: f64,
}

impl OrderTotals {
    /// Folds a sequence of items into totals.
    ///
    /// An empty sequence yields all zeros.
    pub fn from_items(items: &[LineItem]) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::subtotal_without_vat).sum();
        let vat: f64 = items.iter().map(LineItem::vat_amount).sum();

        OrderTotals {
            subtotal,
            vat,
            total: subtotal + vat,
        }
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// The persisted form of an order.
///
/// ## JSON Shape
/// ```json
/// {
///     "order_name": "Order",
///     "items": [
///         { "name": "Widget", "quantity": 3.0, "unit_price": 10.0, "vat_rate": 21.0 }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_name: String,
    pub items: Vec<LineItem>,
    /// When the record was written. Older files have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    /// Creates a record with a normalized order name.
    pub fn new(order_name: &str, items: Vec<LineItem>) -> Self {
        OrderRecord {
            order_name: validation::normalize_order_name(order_name),
            items,
            saved_at: None,
        }
    }

    /// Checks every item against the line item rules.
    ///
    /// Used on records coming from outside the process, which never went
    /// through [`LineItem::from_input`].
    pub fn validate(&self) -> CoreResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            validation::validate_line_item(item)
                .map_err(|source| CoreError::InvalidItem { index, source })?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_line_item_math() {
        let item = LineItem::new("Widget", 3.0, 10.0, 21.0);
        assert!(approx(item.subtotal_without_vat(), 30.0));
        assert!(approx(item.vat_amount(), 6.3));
    }

    #[test]
    fn test_line_item_math_is_pure() {
        let item = LineItem::new("Widget", 3.0, 10.0, 21.0);
        let first = (item.subtotal_without_vat(), item.vat_amount());
        let second = (item.subtotal_without_vat(), item.vat_amount());
        assert_eq!(first, second);
    }

    #[test]
    fn test_totals_over_items() {
        let items = vec![
            LineItem::new("Bolt", 2.0, 5.0, 0.0),
            LineItem::new("Drill", 1.0, 100.0, 10.0),
        ];
        let totals = OrderTotals::from_items(&items);

        assert!(approx(totals.subtotal, 110.0));
        assert!(approx(totals.vat, 10.0));
        assert!(approx(totals.total, 120.0));
    }

    #[test]
    fn test_totals_empty_order() {
        let totals = OrderTotals::from_items(&[]);
        assert_eq!(totals, OrderTotals::default());
    }

    #[test]
    fn test_from_input_defaults_blank_name() {
        let item = LineItem::from_input("   ", "1", "1", "0").unwrap();
        assert_eq!(item.name, crate::DEFAULT_ITEM_NAME);
    }

    #[test]
    fn test_from_input_rejects_bad_numbers() {
        let err = LineItem::from_input("Tea", "two", "2", "15").unwrap_err();
        assert_eq!(err.field(), "quantity");

        let err = LineItem::from_input("Tea", "2", "-2", "15").unwrap_err();
        assert_eq!(err.field(), "unit_price");

        let err = LineItem::from_input("Tea", "2", "2", "").unwrap_err();
        assert_eq!(err.field(), "vat_rate");
    }

    #[test]
    fn test_record_blank_name_defaults() {
        let record = OrderRecord::new("  ", Vec::new());
        assert_eq!(record.order_name, crate::DEFAULT_ORDER_NAME);
    }

    #[test]
    fn test_record_validate_reports_position() {
        let record = OrderRecord::new(
            "Order",
            vec![
                LineItem::new("ok", 1.0, 1.0, 0.0),
                LineItem::new("bad", -1.0, 1.0, 0.0),
            ],
        );
        match record.validate() {
            Err(CoreError::InvalidItem { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidItem, got {:?}", other),
        }
    }

    #[test]
    fn test_record_json_shape() {
        let record = OrderRecord::new("Shop", vec![LineItem::new("Pen", 2.0, 1.5, 21.0)]);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["order_name"], "Shop");
        assert_eq!(value["items"][0]["name"], "Pen");
        assert_eq!(value["items"][0]["unit_price"], 1.5);
        assert!(value.get("saved_at").is_none());
    }
}

//! # Order Commands
//!
//! Name the order, add items, list them.
//!
//! Input text is validated here, before anything reaches [`OrderState`].

use tracing::info;

use tally_core::LineItem;
use tally_engine::OrderState;

use crate::error::AppResult;

/// Text shown for an order without items.
pub const EMPTY_ORDER: &str = "No items in the order.";

/// Sets the order name (blank → `"Order"`) and returns the applied name.
pub fn set_name(order: &OrderState, name: &str) -> String {
    order.set_name(name);
    let applied = order.name();
    info!("Order name set to '{}'", applied);
    applied
}

/// Parses the four fields and appends the item.
///
/// ## Accepted Input
/// - name: blank → `"Item"`
/// - quantity, unit price, VAT %: numbers `>= 0`, `,` or `.` as decimal mark
///
/// Nothing is appended when any field is rejected.
pub fn add_item(
    order: &OrderState,
    name: &str,
    quantity: &str,
    unit_price: &str,
    vat_rate: &str,
) -> AppResult<LineItem> {
    let item = LineItem::from_input(name, quantity, unit_price, vat_rate)?;
    order.add_item(item.clone());

    info!(
        "Item added: name='{}', qty={}, price={}, vat={}",
        item.name, item.quantity, item.unit_price, item.vat_rate
    );
    Ok(item)
}

/// Formats one item for display.
pub fn format_item(item: &LineItem) -> String {
    format!(
        "{} | qty={} | unit={:.2} | VAT={:.1}%",
        item.name, item.quantity, item.unit_price, item.vat_rate
    )
}

/// Returns one display line per item, in insertion order.
pub fn list_items(order: &OrderState) -> Vec<String> {
    let items = order.snapshot();
    if items.is_empty() {
        return vec![EMPTY_ORDER.to_string()];
    }
    items.iter().map(format_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_set_name_defaults_blank() {
        let order = OrderState::default();
        assert_eq!(set_name(&order, "  Lunch "), "Lunch");
        assert_eq!(set_name(&order, "   "), "Order");
    }

    #[test]
    fn test_add_item_parses_and_appends() {
        let order = OrderState::default();
        let item = add_item(&order, "", "2", "3,50", "21").unwrap();

        assert_eq!(item.name, "Item");
        assert_eq!(item.unit_price, 3.5);
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_rejected_item_leaves_order_untouched() {
        let order = OrderState::default();

        let err = add_item(&order, "Pen", "two", "1", "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = add_item(&order, "Pen", "1", "-1", "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        assert!(order.is_empty());
    }

    #[test]
    fn test_list_items() {
        let order = OrderState::default();
        assert_eq!(list_items(&order), vec![EMPTY_ORDER.to_string()]);

        add_item(&order, "Coffee", "2", "3.5", "15").unwrap();
        add_item(&order, "Tea", "1", "2", "7.5").unwrap();

        assert_eq!(
            list_items(&order),
            vec![
                "Coffee | qty=2 | unit=3.50 | VAT=15.0%".to_string(),
                "Tea | qty=1 | unit=2.00 | VAT=7.5%".to_string(),
            ]
        );
    }
}

//! Console output for worker events.

use tally_core::OrderTotals;
use tally_engine::WorkerObserver;

/// Prints a summary to stdout after every calculation.
pub struct ConsoleObserver;

/// Renders the calculation summary block.
pub fn render_totals(totals: &OrderTotals) -> String {
    format!(
        "\n[INFO] Calculation completed in worker thread.\n\
         [INFO] Subtotal (without VAT): {:.2}\n\
         [INFO] VAT total:              {:.2}\n\
         [INFO] Total (with VAT):       {:.2}\n",
        totals.subtotal, totals.vat, totals.total
    )
}

impl WorkerObserver for ConsoleObserver {
    fn on_started(&self) {}

    fn on_calculated(&self, totals: &OrderTotals) {
        println!("{}", render_totals(totals));
    }

    fn on_stopped(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_totals() {
        let text = render_totals(&OrderTotals {
            subtotal: 110.0,
            vat: 10.0,
            total: 120.0,
        });

        assert!(text.contains("[INFO] Subtotal (without VAT): 110.00"));
        assert!(text.contains("[INFO] VAT total:              10.00"));
        assert!(text.contains("[INFO] Total (with VAT):       120.00"));
    }
}

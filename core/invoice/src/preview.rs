//! FILENAME: core/invoice/src/preview.rs
//! PURPOSE: Plain-text print preview of an invoice.

use crate::record::check_required;
use crate::{InvoiceId, LineItems, ValidationError};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// Default currency symbol printed before amounts.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Rounds to whole paise/cents, halves away from zero (2.675 -> 2.68).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with two decimals and the currency symbol.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    format!("{}{:.2}", currency, round_money(amount))
}

/// Renders the printable preview. Works for unsaved and retrieved invoices alike.
pub fn render_preview(
    id: &InvoiceId,
    vehicle: &str,
    items: &LineItems,
    currency: &str,
) -> Result<String, ValidationError> {
    check_required(id, vehicle, items)?;

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "Invoice Preview");
    let _ = writeln!(out);
    let _ = writeln!(out, "Bill No: {}", id);
    let _ = writeln!(out, "Vehicle No: {}", vehicle.trim());
    let _ = writeln!(out);
    let _ = writeln!(out, "Jobs Done:");
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {}",
            i + 1,
            item.description,
            format_amount(item.amount, currency)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Amount: {}", format_amount(items.total(), currency));
    let _ = writeln!(out);
    let _ = write!(out, "(Signature Below on Printed Copy)");

    Ok(out)
}

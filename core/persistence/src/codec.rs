//! FILENAME: core/persistence/src/codec.rs
//! PURPOSE: The human-readable "Jobs Done" / "Amounts" columns.
//! CONTEXT: Descriptions and amounts are joined independently with the same
//! delimiter and must be zipped back by position. Rows written by this crate also
//! carry one metadata row per item, so these helpers only decode legacy rows on
//! the read path, and the joined text may be cut short to fit a cell.

use crate::PersistenceError;
use invoice::{parse_amount, round_money, LineItem, LineItems, MAX_TEXT_CHARS};
use rust_decimal::Decimal;

/// Separator used inside the joined columns.
pub const ITEM_DELIMITER: &str = "; ";

pub fn join_descriptions(items: &LineItems) -> String {
    items
        .iter()
        .map(|item| item.description.as_str())
        .collect::<Vec<_>>()
        .join(ITEM_DELIMITER)
}

pub fn join_amounts(items: &LineItems) -> String {
    items
        .iter()
        .map(|item| format_cell_amount(item.amount))
        .collect::<Vec<_>>()
        .join(ITEM_DELIMITER)
}

/// Two decimals, no currency symbol.
pub fn format_cell_amount(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Marker appended to joined text that had to be shortened.
pub const TRUNCATION_MARKER: &str = " …";

/// Shortens `text` to fit a single cell. Returns the text unchanged when it fits.
pub fn fit_cell(text: &str) -> (String, bool) {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return (text.to_string(), false);
    }
    let keep = MAX_TEXT_CHARS - TRUNCATION_MARKER.chars().count();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    (out, true)
}

/// Rebuilds line items from the two joined columns.
///
/// A count mismatch means a description contained the delimiter; that row cannot
/// be decoded reliably and is reported as an invalid format.
pub fn split_columns(id: &str, jobs: &str, amounts: &str) -> Result<LineItems, PersistenceError> {
    if jobs.is_empty() && amounts.is_empty() {
        return Ok(LineItems::new());
    }

    let descriptions: Vec<&str> = jobs.split(ITEM_DELIMITER).collect();
    let values: Vec<&str> = amounts.split(ITEM_DELIMITER).collect();

    if descriptions.len() != values.len() {
        return Err(PersistenceError::InvalidFormat(format!(
            "{}: {} jobs but {} amounts",
            id,
            descriptions.len(),
            values.len()
        )));
    }

    descriptions
        .into_iter()
        .zip(values)
        .map(|(description, value)| -> Result<LineItem, PersistenceError> {
            let amount = parse_amount(value).map_err(|e| {
                PersistenceError::InvalidFormat(format!("{}: {}", id, e))
            })?;
            Ok(LineItem {
                description: description.to_string(),
                amount,
            })
        })
        .collect()
}

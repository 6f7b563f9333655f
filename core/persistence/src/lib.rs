//! FILENAME: core/persistence/src/lib.rs
//! Invoice Ledger Persistence Module
//!
//! Stores invoices in a single XLSX workbook: one visible sheet with one row per
//! invoice, plus a hidden sheet with one row per line item.

mod codec;
mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use codec::{
    fit_cell, format_cell_amount, join_amounts, join_descriptions, split_columns, ITEM_DELIMITER,
    TRUNCATION_MARKER,
};
pub use error::PersistenceError;
pub use xlsx_reader::load_table;
pub use xlsx_writer::save_table;

use invoice::{parse_amount, InvoiceId, InvoiceRecord, LineItem, LineItems, SignatureRef};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// LAYOUT
// ============================================================================

/// Name of the visible invoice sheet.
pub const INVOICE_SHEET_NAME: &str = "Invoices";

/// Hidden sheet holding one row per line item, keyed by bill number and position.
/// It is read back during load and rewritten during save.
pub const META_SHEET_NAME: &str = "_invoice_items";

/// Fixed header of the invoice sheet.
pub const HEADER: [&str; 6] = ["Bill No", "Vehicle No", "Jobs Done", "Amounts", "Total", "Signature"];

/// Header of the hidden metadata sheet.
pub const META_HEADER: [&str; 4] = ["Bill No", "Line", "Description", "Amount"];

// ============================================================================
// TABLE ROW
// ============================================================================

/// One invoice row exactly as it appears in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub bill_no: String,
    pub vehicle_no: String,
    pub jobs: String,
    pub amounts: String,
    /// Written for readers of the sheet; never trusted on read.
    pub total: Option<f64>,
    pub signature: String,
}

impl TableRow {
    /// Builds the visible row. Joined text too long for a cell is shortened;
    /// the item sheet keeps the full list.
    pub fn from_record(record: &InvoiceRecord) -> Self {
        let total = format_cell_amount(record.total()).parse::<f64>().ok();
        let (jobs, jobs_cut) = fit_cell(&join_descriptions(&record.items));
        let (amounts, amounts_cut) = fit_cell(&join_amounts(&record.items));
        if jobs_cut || amounts_cut {
            log::warn!(
                "{}: {} jobs do not fit one cell; visible columns shortened",
                record.id,
                record.items.len()
            );
        }
        Self {
            bill_no: record.id.to_string(),
            vehicle_no: record.vehicle.clone(),
            jobs,
            amounts,
            total,
            signature: record.signature.to_string(),
        }
    }
}

// ============================================================================
// ITEM ROW
// ============================================================================

/// One line item as stored in the hidden sheet. The amount keeps its exact
/// decimal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub line: u32,
    pub description: String,
    pub amount: String,
}

impl ItemRow {
    pub fn from_items(items: &LineItems) -> Vec<ItemRow> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| ItemRow {
                line: idx as u32 + 1,
                description: item.description.clone(),
                amount: item.amount.to_string(),
            })
            .collect()
    }
}

// ============================================================================
// INVOICE TABLE
// ============================================================================

/// In-memory image of the whole workbook. Rows stay in save order.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTable {
    pub rows: Vec<TableRow>,
    /// Item rows keyed by bill number. Amounts are parsed lazily so a damaged
    /// entry only affects the invoice it belongs to.
    pub item_lists: HashMap<String, Vec<ItemRow>>,
}

impl InvoiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bill numbers of every row, in save order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.bill_no.as_str())
    }

    /// First row with exactly this bill number.
    pub fn find(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.bill_no == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a record at the end. Uniqueness is the caller's concern.
    pub fn append(&mut self, record: &InvoiceRecord) {
        self.rows.push(TableRow::from_record(record));
        self.item_lists
            .insert(record.id.to_string(), ItemRow::from_items(&record.items));
    }

    /// Rebuilds the record stored in `row`. The item sheet is used when it has
    /// rows for this bill number; otherwise the joined columns are split.
    pub fn reconstruct(&self, row: &TableRow) -> Result<InvoiceRecord, PersistenceError> {
        let items = match self.item_lists.get(&row.bill_no) {
            Some(stored) => items_from_rows(&row.bill_no, stored)?,
            None => split_columns(&row.bill_no, &row.jobs, &row.amounts)?,
        };

        Ok(InvoiceRecord {
            id: InvoiceId::new(row.bill_no.clone()),
            vehicle: row.vehicle_no.clone(),
            items,
            signature: SignatureRef::new(row.signature.clone()),
        })
    }
}

fn items_from_rows(id: &str, stored: &[ItemRow]) -> Result<LineItems, PersistenceError> {
    let mut ordered: Vec<&ItemRow> = stored.iter().collect();
    ordered.sort_by_key(|item| item.line);

    ordered
        .into_iter()
        .map(|item| -> Result<LineItem, PersistenceError> {
            let amount = parse_amount(&item.amount).map_err(|e| {
                PersistenceError::InvalidFormat(format!("{} line {}: {}", id, item.line, e))
            })?;
            Ok(LineItem {
                description: item.description.clone(),
                amount,
            })
        })
        .collect()
}

// ============================================================================
// FILE-LEVEL OPERATIONS
// ============================================================================

/// Creates an empty table with only the header if `path` does not exist.
/// Returns true when a new file was written.
pub fn create_if_missing(path: &Path) -> Result<bool, PersistenceError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_table(&InvoiceTable::new(), path)?;
    Ok(true)
}

/// Loads the table, or an empty one when the file does not exist yet.
pub fn load_or_empty(path: &Path) -> Result<InvoiceTable, PersistenceError> {
    if path.exists() {
        load_table(path)
    } else {
        Ok(InvoiceTable::new())
    }
}

/// Reads the table, appends one record and writes the table back.
pub fn append_record(path: &Path, record: &InvoiceRecord) -> Result<(), PersistenceError> {
    let mut table = load_or_empty(path)?;
    table.append(record);
    save_table(&table, path)
}

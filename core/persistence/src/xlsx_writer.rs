//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{InvoiceTable, PersistenceError, HEADER, INVOICE_SHEET_NAME, META_HEADER, META_SHEET_NAME};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::collections::HashSet;
use std::path::Path;

/// Column widths in Excel character units, one per header column.
const COLUMN_WIDTHS: [f64; 6] = [10.0, 14.0, 40.0, 20.0, 12.0, 24.0];

/// Writes the whole table. Rows are written in their stored order.
pub fn save_table(table: &InvoiceTable, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();
    let total_format = Format::new().set_num_format("0.00");

    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(INVOICE_SHEET_NAME)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        worksheet.write_string(r, 0, &row.bill_no)?;
        worksheet.write_string(r, 1, &row.vehicle_no)?;
        worksheet.write_string(r, 2, &row.jobs)?;
        worksheet.write_string(r, 3, &row.amounts)?;
        if let Some(total) = row.total {
            worksheet.write_number_with_format(r, 4, total, &total_format)?;
        }
        worksheet.write_string(r, 5, &row.signature)?;
    }

    let meta = xlsx.add_worksheet();
    meta.set_name(META_SHEET_NAME)?;
    for (col, title) in META_HEADER.iter().enumerate() {
        meta.write_string(0, col as u16, *title)?;
    }

    // Follow row order so the sheet reads like the visible one. A bill number
    // appearing twice gets its items written once.
    let mut written = HashSet::new();
    let mut r = 1;
    for row in &table.rows {
        let Some(items) = table.item_lists.get(&row.bill_no) else {
            continue;
        };
        if !written.insert(row.bill_no.as_str()) {
            continue;
        }
        for item in items {
            meta.write_string(r, 0, &row.bill_no)?;
            meta.write_number(r, 1, item.line as f64)?;
            meta.write_string(r, 2, &item.description)?;
            meta.write_string(r, 3, &item.amount)?;
            r += 1;
        }
    }
    meta.set_hidden(true);

    xlsx.save(path)?;
    Ok(())
}

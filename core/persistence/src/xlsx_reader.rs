// FILENAME: core\persistence\src\xlsx_reader.rs

use crate::{InvoiceTable, ItemRow, PersistenceError, TableRow, INVOICE_SHEET_NAME, META_SHEET_NAME};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

pub fn load_table(path: &Path) -> Result<InvoiceTable, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    // Workbooks written by older tools may name the first sheet differently
    let invoice_sheet = sheet_names
        .iter()
        .find(|name| name.as_str() == INVOICE_SHEET_NAME)
        .or_else(|| sheet_names.iter().find(|name| name.as_str() != META_SHEET_NAME))
        .cloned()
        .ok_or_else(|| {
            PersistenceError::InvalidFormat("Workbook contains no invoice sheet".to_string())
        })?;

    let range = workbook.worksheet_range(&invoice_sheet)?;
    let mut rows = Vec::new();

    for row in data_rows(&range) {
        let bill_no = cell_text(row.first());
        if bill_no.is_empty() && row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        rows.push(TableRow {
            bill_no,
            vehicle_no: cell_text(row.get(1)),
            jobs: cell_text(row.get(2)),
            amounts: cell_text(row.get(3)),
            total: cell_number(row.get(4)),
            signature: cell_text(row.get(5)),
        });
    }

    let mut item_lists: HashMap<String, Vec<ItemRow>> = HashMap::new();
    if sheet_names.iter().any(|name| name == META_SHEET_NAME) {
        let meta = workbook.worksheet_range(META_SHEET_NAME)?;
        for row in data_rows(&meta) {
            let bill_no = cell_text(row.first());
            if bill_no.is_empty() {
                continue;
            }
            let stored = item_lists.entry(bill_no).or_default();
            // A missing line number keeps sheet order
            let line = cell_number(row.get(1))
                .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
                .map(|n| n as u32)
                .unwrap_or(stored.len() as u32 + 1);
            stored.push(ItemRow {
                line,
                description: cell_text(row.get(2)),
                amount: cell_text(row.get(3)),
            });
        }
    }

    Ok(InvoiceTable { rows, item_lists })
}

/// Rows below the header. The header always sits on the first sheet row.
fn data_rows(range: &Range<Data>) -> impl Iterator<Item = &[Data]> {
    let header_rows = match range.start() {
        Some((0, _)) => 1,
        _ => 0,
    };
    range.rows().skip(header_rows)
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                format!("{}", f)
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::Error(e)) => format!("{:?}", e),
        Some(Data::DateTime(dt)) => dt.as_f64().to_string(),
        Some(Data::DateTimeIso(s)) => s.clone(),
        Some(Data::DurationIso(s)) => s.clone(),
    }
}

fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

//! FILENAME: app/src/ledger.rs
//! PURPOSE: The invoice ledger: numbering, saving and retrieving invoices.
//! CONTEXT: Every call reads the workbook from disk. Nothing is cached, so the
//! next identifier can never drift from what is actually persisted. Records are
//! append-only; there is no update or delete.

use crate::{log_enter_info, log_exit_info, log_info, log_warn, LedgerError};
use invoice::{next_identifier, Decimal, InvoiceId, InvoiceRecord, LineItems, SignatureRef};
use persistence::{create_if_missing, format_cell_amount, load_or_empty, save_table, InvoiceTable};
use std::path::{Path, PathBuf};

const CAT: &str = "LEDGER";

#[derive(Debug, Clone)]
pub struct Ledger {
    table_path: PathBuf,
}

impl Ledger {
    /// A ledger backed by the workbook at `table_path`. Nothing is touched on disk.
    pub fn new(table_path: impl Into<PathBuf>) -> Self {
        Self {
            table_path: table_path.into(),
        }
    }

    /// Creates the ledger and makes sure its table exists.
    pub fn open(table_path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let ledger = Self::new(table_path);
        ledger.initialize_storage()?;
        Ok(ledger)
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Writes a header-only table when none exists. An existing table is left
    /// untouched. Returns true when a table was created.
    pub fn initialize_storage(&self) -> Result<bool, LedgerError> {
        let created = create_if_missing(&self.table_path)?;
        if created {
            log_info!(CAT, "created invoice table at {:?}", self.table_path);
        }
        Ok(created)
    }

    fn load(&self) -> Result<InvoiceTable, LedgerError> {
        Ok(load_or_empty(&self.table_path)?)
    }

    /// `INV` + (highest persisted suffix + 1), or `INV001` for an empty ledger.
    pub fn next_identifier(&self) -> Result<InvoiceId, LedgerError> {
        let table = self.load()?;
        Ok(next_identifier(table.identifiers()))
    }

    /// Identifiers of all persisted invoices in save order.
    pub fn identifiers(&self) -> Result<Vec<InvoiceId>, LedgerError> {
        let table = self.load()?;
        Ok(table.identifiers().map(InvoiceId::from).collect())
    }

    pub fn contains(&self, id: &InvoiceId) -> Result<bool, LedgerError> {
        Ok(self.load()?.contains(id.as_str()))
    }

    /// Validates and appends one invoice, returning its total.
    ///
    /// The duplicate check and the append are two separate file operations; the
    /// ledger assumes a single writer.
    pub fn save_invoice(
        &self,
        id: &InvoiceId,
        vehicle: &str,
        items: &LineItems,
        signature: SignatureRef,
    ) -> Result<Decimal, LedgerError> {
        log_enter_info!(CAT, "save_invoice", "id={} items={}", id, items.len());

        let record = InvoiceRecord::new(id.clone(), vehicle, items.clone(), signature)?;

        let mut table = self.load()?;
        if table.contains(record.id.as_str()) {
            log_warn!(CAT, "rejected duplicate bill number {}", record.id);
            return Err(LedgerError::DuplicateIdentifier(record.id));
        }

        table.append(&record);
        save_table(&table, &self.table_path)?;

        let total = record.total();
        log_exit_info!(CAT, "save_invoice", "id={} total={}", record.id, total);
        Ok(total)
    }

    /// Looks up the first invoice with this bill number.
    pub fn retrieve_invoice(&self, id: &str) -> Result<InvoiceRecord, LedgerError> {
        let id = id.trim();
        let table = self.load()?;

        let row = table
            .find(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let record = table.reconstruct(row)?;

        let recomputed = format_cell_amount(record.total());
        if let Some(stored) = row.total {
            if recomputed.parse::<f64>().ok() != Some(stored) {
                log_warn!(
                    CAT,
                    "stored total {} for {} differs from items ({}); using items",
                    stored,
                    id,
                    recomputed
                );
            }
        }

        log_info!(CAT, "retrieved {} ({} items)", id, record.items.len());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn items(pairs: &[(&str, &str)]) -> LineItems {
        let mut items = LineItems::new();
        for (d, a) in pairs {
            items.add(d, a).unwrap();
        }
        items
    }

    #[test]
    fn test_next_identifier_without_table() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("invoices.xlsx"));
        assert_eq!(ledger.next_identifier().unwrap().as_str(), "INV001");
    }

    #[test]
    fn test_save_and_retrieve() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::open(dir.path().join("invoices.xlsx")).unwrap();
        let id = ledger.next_identifier().unwrap();

        let total = ledger
            .save_invoice(
                &id,
                "KA-05-7788",
                &items(&[("Bearing replacement", "300.0"), ("Labor", "200.0")]),
                SignatureRef::for_invoice(&id),
            )
            .unwrap();
        assert_eq!(total, Decimal::from(500));

        let record = ledger.retrieve_invoice("INV001").unwrap();
        assert_eq!(record.vehicle, "KA-05-7788");
        assert_eq!(record.total(), Decimal::from(500));
        assert_eq!(ledger.next_identifier().unwrap().as_str(), "INV002");
    }

    #[test]
    fn test_retrieve_trims_query() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::open(dir.path().join("invoices.xlsx")).unwrap();
        let id = InvoiceId::first();
        ledger
            .save_invoice(&id, "KA", &items(&[("Labor", "1")]), SignatureRef::for_invoice(&id))
            .unwrap();

        assert!(ledger.retrieve_invoice("  INV001 \n").is_ok());
    }
}

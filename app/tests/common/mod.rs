//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for invoice ledger integration tests.

#![allow(dead_code)]

use app_lib::{Ledger, LedgerConfig, LineItems, SignatureRef, SignatureStore, WorkingSession};
use invoice::InvoiceId;
use persistence::{load_table, save_table, InvoiceTable, TableRow};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness owning a temporary directory with its own workbook.
pub struct TestHarness {
    pub dir: TempDir,
    pub config: LedgerConfig,
}

impl TestHarness {
    /// Create a harness with no workbook on disk yet.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = LedgerConfig::in_dir(dir.path());
        TestHarness { dir, config }
    }

    /// Create a harness whose workbook already holds invoices with these ids.
    pub fn with_invoices(ids: &[&str]) -> Self {
        let harness = Self::new();
        let ledger = harness.ledger();
        for id in ids {
            let id = InvoiceId::new(*id);
            ledger
                .save_invoice(&id, "KA-01-1234", &items(&[("Labor", "100")]), SignatureRef::for_invoice(&id))
                .unwrap();
        }
        harness
    }

    /// Create a harness whose workbook was written by the legacy tool:
    /// joined columns only, no structured item sheet.
    pub fn with_legacy_rows(rows: &[(&str, &str, &str, &str, f64)]) -> Self {
        let harness = Self::new();
        let mut table = InvoiceTable::new();
        for (bill_no, vehicle, jobs, amounts, total) in rows {
            table.rows.push(TableRow {
                bill_no: bill_no.to_string(),
                vehicle_no: vehicle.to_string(),
                jobs: jobs.to_string(),
                amounts: amounts.to_string(),
                total: Some(*total),
                signature: format!("signature_{}.ps", bill_no),
            });
        }
        save_table(&table, &harness.config.table_path).unwrap();
        harness
    }

    pub fn table_path(&self) -> PathBuf {
        self.config.table_path.clone()
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::open(self.table_path()).unwrap()
    }

    pub fn session(&self) -> WorkingSession {
        WorkingSession::start(&self.config).unwrap()
    }

    pub fn signatures(&self) -> SignatureStore {
        SignatureStore::new(self.config.signature_dir.clone())
    }

    /// Number of invoice rows currently on disk.
    pub fn row_count(&self) -> usize {
        load_table(&self.table_path()).unwrap().len()
    }
}

/// Build a line item list from (description, amount) pairs.
pub fn items(pairs: &[(&str, &str)]) -> LineItems {
    let mut list = LineItems::new();
    for (description, amount) in pairs {
        list.add(description, amount).unwrap();
    }
    list
}

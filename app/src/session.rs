//! FILENAME: app/src/session.rs
//! PURPOSE: The in-progress invoice a user is filling in.
//! CONTEXT: Holds the transient state the form works on (bill number, vehicle,
//! line items) and calls into the ledger only when saving or retrieving.

use crate::{log_debug, log_error, log_info, Ledger, LedgerConfig, LedgerError, SignatureStore};
use invoice::{render_preview, Decimal, InvoiceId, InvoiceRecord, LineItems};

const CAT: &str = "SESSION";

#[derive(Debug)]
pub struct WorkingSession {
    ledger: Ledger,
    signatures: SignatureStore,
    currency: String,
    current_id: InvoiceId,
    vehicle: String,
    items: LineItems,
}

impl WorkingSession {
    /// Opens the ledger described by `config` and allocates the first bill number.
    pub fn start(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let ledger = Ledger::open(config.table_path.clone())?;
        let signatures = SignatureStore::new(config.signature_dir.clone());
        Self::new(ledger, signatures, &config.currency_symbol)
    }

    pub fn new(
        ledger: Ledger,
        signatures: SignatureStore,
        currency: &str,
    ) -> Result<Self, LedgerError> {
        let current_id = ledger.next_identifier()?;
        Ok(Self {
            ledger,
            signatures,
            currency: currency.to_string(),
            current_id,
            vehicle: String::new(),
            items: LineItems::new(),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn signatures(&self) -> &SignatureStore {
        &self.signatures
    }

    pub fn current_id(&self) -> &InvoiceId {
        &self.current_id
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    pub fn items(&self) -> &LineItems {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.items.total()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_vehicle(&mut self, vehicle: &str) {
        self.vehicle = vehicle.trim().to_string();
    }

    /// Adds a job and returns the running total. A rejected job leaves the list as it was.
    pub fn add_line_item(&mut self, description: &str, amount: &str) -> Result<Decimal, LedgerError> {
        let total = self.items.add(description, amount)?;
        log_debug!(CAT, "added job '{}' (total {})", description.trim(), total);
        Ok(total)
    }

    /// Clears the form and allocates a fresh bill number from the ledger.
    pub fn reset(&mut self) -> Result<(), LedgerError> {
        self.items.clear();
        self.vehicle.clear();
        self.current_id = self.ledger.next_identifier()?;
        Ok(())
    }

    /// Saves the current invoice with the given signature artifact, then resets
    /// the form. On failure nothing in the form changes.
    pub fn save(&mut self, signature: &[u8]) -> Result<(InvoiceId, Decimal), LedgerError> {
        // Validate and check for duplicates before an artifact is written. With
        // no row for this bill number, an existing artifact is an orphan.
        InvoiceRecord::new(
            self.current_id.clone(),
            &self.vehicle,
            self.items.clone(),
            Default::default(),
        )?;
        if self.ledger.contains(&self.current_id)? {
            return Err(LedgerError::DuplicateIdentifier(self.current_id.clone()));
        }

        let reference = self.signatures.write(&self.current_id, signature)?;
        let total = self
            .ledger
            .save_invoice(&self.current_id, &self.vehicle, &self.items, reference)?;

        let saved = self.current_id.clone();
        log_info!(CAT, "Invoice {} saved successfully, total {}", saved, total);

        // The row is already written at this point
        if let Err(e) = self.reset() {
            log_error!(CAT, "could not allocate next bill number: {}", e);
        }
        Ok((saved, total))
    }

    /// Retrieves an invoice and shows it in the form.
    pub fn load(&mut self, id: &str) -> Result<InvoiceRecord, LedgerError> {
        let record = self.ledger.retrieve_invoice(id)?;
        self.current_id = record.id.clone();
        self.vehicle = record.vehicle.clone();
        self.items = record.items.clone();
        Ok(record)
    }

    /// Print preview of whatever the form currently shows.
    pub fn preview(&self) -> Result<String, LedgerError> {
        Ok(render_preview(
            &self.current_id,
            &self.vehicle,
            &self.items,
            &self.currency,
        )?)
    }
}

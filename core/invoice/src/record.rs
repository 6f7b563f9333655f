//! FILENAME: core/invoice/src/record.rs
//! PURPOSE: A complete invoice as persisted in the ledger.
//! CONTEXT: Records are only ever built through `InvoiceRecord::new`, which enforces
//! the required fields. The total is derived from the items on demand.

use crate::{InvoiceId, LineItems, ValidationError, MAX_TEXT_CHARS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to the signature artifact stored next to the table.
/// The ledger never opens or interprets the artifact itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureRef(String);

impl SignatureRef {
    pub fn new(reference: impl Into<String>) -> Self {
        SignatureRef(reference.into())
    }

    /// Conventional artifact file name for an invoice.
    pub fn for_invoice(id: &InvoiceId) -> Self {
        SignatureRef(format!("signature_{}.ps", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub vehicle: String,
    pub items: LineItems,
    pub signature: SignatureRef,
}

impl InvoiceRecord {
    /// Assembles a record, rejecting missing fields, over-long text and item
    /// lists whose total cannot be represented. The vehicle number is stored trimmed.
    pub fn new(
        id: InvoiceId,
        vehicle: &str,
        items: LineItems,
        signature: SignatureRef,
    ) -> Result<Self, ValidationError> {
        check_required(&id, vehicle, &items)?;
        Ok(InvoiceRecord {
            id,
            vehicle: vehicle.trim().to_string(),
            items,
            signature,
        })
    }

    pub fn total(&self) -> Decimal {
        self.items.total()
    }
}

/// Shared required-field check for saving and previewing.
pub fn check_required(
    id: &InvoiceId,
    vehicle: &str,
    items: &LineItems,
) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingIdentifier);
    }
    if vehicle.trim().is_empty() {
        return Err(ValidationError::MissingVehicle);
    }
    if items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }
    check_length("Bill number", id.as_str())?;
    check_length("Vehicle number", vehicle.trim())?;
    for item in items {
        check_length("Job description", &item.description)?;
    }
    if items.checked_total().is_none() {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

fn check_length(field: &'static str, text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong {
            field,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

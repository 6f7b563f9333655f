//! FILENAME: app/src/error.rs

use invoice::{InvoiceId, ValidationError};
use persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Input error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bill number already exists: {0}")]
    DuplicateIdentifier(InvoiceId),

    #[error("No invoice found with Bill No: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for errors caused by user input rather than storage problems.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation(_) | LedgerError::DuplicateIdentifier(_) | LedgerError::NotFound(_)
        )
    }
}

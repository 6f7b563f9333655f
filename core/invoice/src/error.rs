//! FILENAME: core/invoice/src/error.rs

use thiserror::Error;

/// Input rejected before anything is persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Job description is required")]
    EmptyDescription,

    #[error("Amount is required")]
    EmptyAmount,

    #[error("Amount must be a number: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Total exceeds the largest representable amount")]
    AmountTooLarge,

    #[error("{field} is longer than {max} characters")]
    TextTooLong { field: &'static str, max: usize },

    #[error("Bill number is required")]
    MissingIdentifier,

    #[error("Vehicle number is required")]
    MissingVehicle,

    #[error("At least one job is required")]
    NoLineItems,
}

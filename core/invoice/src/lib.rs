//! FILENAME: core/invoice/src/lib.rs
//! PURPOSE: Domain types for workshop invoices.
//! CONTEXT: Pure data and validation; persistence lives in the `persistence` crate.

pub mod error;
pub mod identifier;
pub mod line_item;
pub mod preview;
pub mod record;

// Re-export commonly used types at the crate root
pub use error::ValidationError;
pub use identifier::{next_identifier, parse_sequence, InvoiceId, ID_PREFIX};
pub use line_item::{parse_amount, LineItem, LineItems, MAX_TEXT_CHARS};
pub use preview::{format_amount, render_preview, round_money, DEFAULT_CURRENCY};
pub use record::{InvoiceRecord, SignatureRef};
pub use rust_decimal::Decimal;

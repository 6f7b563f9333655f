//! FILENAME: core/invoice/src/identifier.rs
//! PURPOSE: Invoice numbers ("Bill No") and sequential allocation.
//! CONTEXT: Identifiers look like `INV007`. The next identifier is always derived
//! from the identifiers already persisted, never from a cached counter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every invoice number.
pub const ID_PREFIX: &str = "INV";

/// Minimum number of digits after the prefix.
pub const ID_WIDTH: usize = 3;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^INV(\d+)$").unwrap());

/// An invoice number such as `INV001`.
///
/// The wrapped string is kept verbatim so identifiers read back from a table
/// compare exactly the way they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Wraps an identifier string as-is (no format check).
    pub fn new(raw: impl Into<String>) -> Self {
        InvoiceId(raw.into())
    }

    /// Builds the identifier for a sequence number, zero-padded to three digits.
    pub fn from_sequence(seq: u64) -> Self {
        InvoiceId(format!("{}{:0width$}", ID_PREFIX, seq, width = ID_WIDTH))
    }

    pub fn first() -> Self {
        Self::from_sequence(1)
    }

    /// Numeric suffix, or None when the identifier does not match `INV<digits>`.
    pub fn sequence(&self) -> Option<u64> {
        parse_sequence(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvoiceId {
    fn from(s: &str) -> Self {
        InvoiceId::new(s)
    }
}

impl From<String> for InvoiceId {
    fn from(s: String) -> Self {
        InvoiceId(s)
    }
}

/// Extracts the numeric suffix of an `INV<digits>` string.
/// Anything else (wrong prefix, stray characters, overflow) yields None.
pub fn parse_sequence(raw: &str) -> Option<u64> {
    let caps = ID_PATTERN.captures(raw)?;
    caps.get(1)?.as_str().parse::<u64>().ok()
}

/// Returns the identifier following the highest well-formed one in `existing`,
/// or `INV001` when there is none. Malformed identifiers are skipped.
pub fn next_identifier<'a, I>(existing: I) -> InvoiceId
where
    I: IntoIterator<Item = &'a str>,
{
    let max_seq = existing
        .into_iter()
        .filter_map(parse_sequence)
        .max()
        .unwrap_or(0);

    InvoiceId::from_sequence(max_seq.saturating_add(1))
}

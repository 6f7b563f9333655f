//! FILENAME: app/src/config.rs
//! PURPOSE: Where the ledger keeps its files.
//! CONTEXT: Read once at launch from an optional JSON file. Every field has a
//! default, so a partial file (or none at all) is fine.

use crate::LedgerError;
use invoice::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "invoice_ledger.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The invoice workbook.
    pub table_path: PathBuf,
    /// Directory receiving one signature artifact per saved invoice.
    pub signature_dir: PathBuf,
    pub log_path: PathBuf,
    pub currency_symbol: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("invoices.xlsx"),
            signature_dir: PathBuf::from("."),
            log_path: PathBuf::from("invoice_ledger.log"),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Defaults with every file placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            table_path: dir.join(&defaults.table_path),
            signature_dir: dir.to_path_buf(),
            log_path: dir.join(&defaults.log_path),
            currency_symbol: defaults.currency_symbol,
        }
    }

    /// Loads the config at `path`. A missing file yields the defaults;
    /// a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

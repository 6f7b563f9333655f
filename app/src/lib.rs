//! FILENAME: app/src/lib.rs
//! PURPOSE: Workshop invoice ledger application library.
//! CONTEXT: The ledger, the working session and the console shell. The binary in
//! `main.rs` only wires configuration and logging together.

pub mod logging;

pub mod config;
pub mod error;
pub mod ledger;
pub mod session;
pub mod shell;
pub mod signature;

pub use config::{LedgerConfig, DEFAULT_CONFIG_FILE};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use session::WorkingSession;
pub use shell::{run_shell, Command};
pub use signature::{blank_artifact, SignatureStore};

pub use invoice::{Decimal, InvoiceId, InvoiceRecord, LineItem, LineItems, SignatureRef, ValidationError};

/// Loads configuration, opens the log file and starts a session.
pub fn bootstrap(config_path: &std::path::Path) -> Result<WorkingSession, LedgerError> {
    let config = LedgerConfig::load(config_path)?;

    if let Err(e) = logging::init_log_file(&config.log_path) {
        eprintln!("[LOG_INIT] Could not open {:?}: {}", config.log_path, e);
    }
    logging::install_logger(log::LevelFilter::Info);

    if config_path.exists() {
        log::info!(target: "config", "loaded {:?}", config_path);
    } else {
        log::warn!(target: "config", "{:?} not found; using defaults", config_path);
    }
    log_info!("APP", "starting with table {:?}", config.table_path);
    WorkingSession::start(&config)
}

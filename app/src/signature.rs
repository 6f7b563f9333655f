//! FILENAME: app/src/signature.rs
//! PURPOSE: Storage for signature artifacts.
//! CONTEXT: The UI captures the signature and hands over the rendered bytes.
//! The ledger only keeps a reference; artifacts are never read back. An artifact
//! belongs to a bill number once the table has a row for it; before that, a file
//! with the same name is an orphan from a save that failed and may be replaced.

use crate::{log_warn, LedgerError};
use invoice::{InvoiceId, SignatureRef};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const CAT: &str = "SIGNATURE";

#[derive(Debug, Clone)]
pub struct SignatureStore {
    dir: PathBuf,
}

impl SignatureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a reference points on disk.
    pub fn resolve(&self, reference: &SignatureRef) -> PathBuf {
        self.dir.join(reference.as_str())
    }

    pub fn exists(&self, id: &InvoiceId) -> bool {
        self.resolve(&SignatureRef::for_invoice(id)).exists()
    }

    /// Stores the artifact for `id`, replacing an orphan left by an earlier
    /// failed save. The caller must have checked that no persisted row uses `id`.
    pub fn write(&self, id: &InvoiceId, bytes: &[u8]) -> Result<SignatureRef, LedgerError> {
        std::fs::create_dir_all(&self.dir)?;

        let reference = SignatureRef::for_invoice(id);
        let path = self.resolve(&reference);
        if path.exists() {
            log_warn!(CAT, "replacing orphaned artifact {:?}", path);
        }

        let mut file = File::create(&path)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(reference)
    }
}

/// A blank PostScript page, used when no drawing surface is available.
pub fn blank_artifact(id: &InvoiceId) -> Vec<u8> {
    format!(
        "%!PS-Adobe-3.0 EPSF-3.0\n%%Title: signature {}\n%%BoundingBox: 0 0 400 100\n%%EndComments\nshowpage\n%%EOF\n",
        id
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = SignatureStore::new(dir.path().join("signatures"));
        let id = InvoiceId::from_sequence(3);

        let reference = store.write(&id, b"first").unwrap();
        assert_eq!(reference.as_str(), "signature_INV003.ps");
        assert!(store.exists(&id));
        assert_eq!(std::fs::read(store.resolve(&reference)).unwrap(), b"first");
    }

    #[test]
    fn test_orphan_is_replaced() {
        let dir = TempDir::new().unwrap();
        let store = SignatureStore::new(dir.path());
        let id = InvoiceId::first();
        std::fs::write(dir.path().join("signature_INV001.ps"), b"stale").unwrap();

        let reference = store.write(&id, b"fresh").unwrap();
        assert_eq!(std::fs::read(store.resolve(&reference)).unwrap(), b"fresh");
    }

    #[test]
    fn test_blank_artifact_names_invoice() {
        let text = String::from_utf8(blank_artifact(&InvoiceId::first())).unwrap();
        assert!(text.starts_with("%!PS"));
        assert!(text.contains("INV001"));
    }
}

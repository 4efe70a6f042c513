use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use crate::{errors::LedgerError, ledger::Transaction};

use super::{codec, LoadReport, Result, StorageBackend};

/// Keeps the encoded ledger in memory. Useful for scratch ledgers and for exercising the
/// store without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storage with already-encoded ledger text.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into().into_bytes())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Current encoded ledger, or `None` when nothing has been stored yet.
    pub fn contents(&self) -> Option<String> {
        self.lock()
            .ok()?
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Makes subsequent saves fail as if the medium were unavailable.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Vec<u8>>>> {
        self.contents
            .lock()
            .map_err(|_| LedgerError::Io(io::Error::new(io::ErrorKind::Other, "storage poisoned")))
    }
}

impl StorageBackend for MemoryStorage {
    fn load_into(&self, into: &mut Vec<Transaction>) -> Result<LoadReport> {
        let guard = self.lock()?;
        match guard.as_deref() {
            Some(bytes) => codec::read_transactions(bytes, into),
            None => Ok(LoadReport::fresh_start()),
        }
    }

    fn save(&self, transactions: &[Transaction], retained: &[String]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Io(io::Error::new(
                io::ErrorKind::Other,
                "in-memory ledger is read-only",
            )));
        }
        let mut buffer = Vec::new();
        codec::write_transactions(&mut buffer, transactions, retained)?;
        *self.lock()? = Some(buffer);
        Ok(())
    }

    fn describe(&self) -> String {
        String::from("<memory>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_before_any_save_is_a_fresh_start() {
        let storage = MemoryStorage::new();
        let mut loaded = Vec::new();
        let report = storage.load_into(&mut loaded).unwrap();
        assert!(report.fresh_start);
        assert!(storage.contents().is_none());
    }

    #[test]
    fn seeded_contents_are_decoded() {
        let storage = MemoryStorage::with_contents("2025-01-15,Income,Salary,1000.00,Paycheck\n");
        let mut loaded = Vec::new();
        let report = storage.load_into(&mut loaded).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(loaded[0].category(), "Salary");
    }

    #[test]
    fn failing_writes_keep_previous_contents() {
        let storage = MemoryStorage::with_contents("2025-01-15,Income,Salary,1000.00,Paycheck\n");
        storage.set_fail_writes(true);
        assert!(storage.save(&[], &[]).is_err());
        assert_eq!(
            storage.contents().as_deref(),
            Some("2025-01-15,Income,Salary,1000.00,Paycheck\n")
        );
    }
}

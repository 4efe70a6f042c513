pub mod codec;
pub mod flat_file;
pub mod memory;

use std::sync::Arc;

use crate::{errors::LedgerError, ledger::Transaction};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// A record that was read but could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub line: u64,
    pub reason: String,
}

/// Outcome of reading a ledger from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records with the wrong number of fields. Dropped without further notice.
    pub dropped: usize,
    pub rejected: Vec<RejectedRecord>,
    /// Raw text of every non-blank line that was dropped or rejected, in file order.
    pub retained: Vec<String>,
    /// `true` when no ledger existed yet and the load started from an empty ledger.
    pub fresh_start: bool,
}

impl LoadReport {
    pub fn fresh_start() -> Self {
        Self {
            fresh_start: true,
            ..Self::default()
        }
    }
}

/// Abstraction over the durable home of a ledger's transactions.
pub trait StorageBackend: Send + Sync {
    /// Appends every readable transaction to `into`, in storage order.
    ///
    /// A missing ledger is a fresh start, not an error. On failure, transactions appended
    /// before the error remain in `into`.
    fn load_into(&self, into: &mut Vec<Transaction>) -> Result<LoadReport>;

    /// Replaces the stored ledger with `transactions`, followed by the `retained` lines
    /// exactly as they were read.
    fn save(&self, transactions: &[Transaction], retained: &[String]) -> Result<()>;

    /// Human-readable location used in log and status messages.
    fn describe(&self) -> String;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn load_into(&self, into: &mut Vec<Transaction>) -> Result<LoadReport> {
        (**self).load_into(into)
    }

    fn save(&self, transactions: &[Transaction], retained: &[String]) -> Result<()> {
        (**self).save(transactions, retained)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;

use crate::errors::LedgerError;
use crate::ledger::{MonthlySummary, Transaction};
use crate::storage::{LoadReport, StorageBackend};

/// Owns the in-memory ledger and keeps it in sync with a storage backend.
///
/// Every [`Store::add`] rewrites the whole ledger. Storage failures are returned to the caller
/// but never roll back the in-memory state. Lines the last load could not decode are written
/// back verbatim after the transactions.
pub struct Store {
    transactions: Vec<Transaction>,
    retained: Vec<String>,
    storage: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            transactions: Vec::new(),
            retained: Vec::new(),
            storage,
        }
    }

    /// Creates a store and loads it, returning the load outcome alongside the store so a
    /// failed read can be reported without losing what was read.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, Result<LoadReport, LedgerError>) {
        let mut store = Self::new(storage);
        let outcome = store.load();
        (store, outcome)
    }

    /// Replaces the in-memory ledger with the stored one.
    ///
    /// On error the transactions read before the failure are kept.
    pub fn load(&mut self) -> Result<LoadReport, LedgerError> {
        self.transactions.clear();
        self.retained.clear();
        match self.storage.load_into(&mut self.transactions) {
            Ok(report) => {
                self.retained = report.retained.clone();
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(
                    location = %self.storage.describe(),
                    kept = self.transactions.len(),
                    "failed to read ledger: {err}"
                );
                Err(err)
            }
        }
    }

    /// Appends a transaction and immediately persists the full ledger.
    pub fn add(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        self.transactions.push(transaction);
        self.save()
    }

    /// Rewrites storage from the current in-memory ledger.
    pub fn save(&self) -> Result<(), LedgerError> {
        self.storage
            .save(&self.transactions, &self.retained)
            .map_err(|err| {
                tracing::warn!(
                    location = %self.storage.describe(),
                    "failed to save ledger: {err}"
                );
                err
            })
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn monthly_summary(&self, month: u32, year: i32) -> Result<MonthlySummary, LedgerError> {
        MonthlySummary::compute(&self.transactions, month, year)
    }

}

#[cfg(test)]
mod tests {
    use std::{str::FromStr, sync::Arc};

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::ledger::TransactionKind;
    use crate::storage::MemoryStorage;

    fn groceries() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            TransactionKind::Expense,
            "Food",
            Decimal::from_str("50.00").unwrap(),
            "Groceries",
        )
        .unwrap()
    }

    #[test]
    fn add_writes_through_to_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = Store::new(Box::new(storage.clone()));

        store.add(groceries()).unwrap();

        assert_eq!(
            storage.contents().as_deref(),
            Some("2025-01-20,Expense,Food,50.00,Groceries\n")
        );
    }

    #[test]
    fn failed_save_keeps_in_memory_append() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_fail_writes(true);
        let mut store = Store::new(Box::new(storage.clone()));

        let result = store.add(groceries());

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(storage.contents().is_none());
    }

    #[test]
    fn reload_replaces_in_memory_ledger() {
        let storage = Arc::new(MemoryStorage::with_contents(
            "2025-01-15,Income,Salary,1000.00,Paycheck\n",
        ));
        let (mut store, outcome) = Store::open(Box::new(storage.clone()));
        assert_eq!(outcome.unwrap().loaded, 1);

        store.load().unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn independent_stores_do_not_share_state() {
        let mut first = Store::new(Box::new(MemoryStorage::new()));
        let second = Store::new(Box::new(MemoryStorage::new()));

        first.add(groceries()).unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn undecodable_lines_survive_the_next_save() {
        let storage = Arc::new(MemoryStorage::with_contents(
            "2025-01-15,Income,Salary,1000.00,Paycheck\n\
             2025-01-16,Income,Salary,ten,Typo\n\
             2025-01-17,Expense,Food,12.00\n",
        ));
        let (mut store, outcome) = Store::open(Box::new(storage.clone()));
        let report = outcome.unwrap();
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.retained.len(), 2);

        store.add(groceries()).unwrap();

        assert_eq!(
            storage.contents().as_deref(),
            Some(
                "2025-01-15,Income,Salary,1000.00,Paycheck\n\
                 2025-01-20,Expense,Food,50.00,Groceries\n\
                 2025-01-16,Income,Salary,ten,Typo\n\
                 2025-01-17,Expense,Food,12.00\n"
            )
        );
    }
}

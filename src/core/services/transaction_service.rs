//! Business logic helpers for recording transactions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::services::{ServiceError, ServiceResult};
use crate::core::store::Store;
use crate::core::time::Clock;
use crate::ledger::{max_amount, parse_amount, parse_date, Transaction, TransactionKind};

/// Entry date chosen for a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDate {
    pub date: NaiveDate,
    /// `true` when the input did not parse and today's date was used instead.
    pub substituted: bool,
}

/// Validates caller input and records transactions in a [`Store`].
pub struct TransactionService;

impl TransactionService {
    /// Records a transaction after checking the category against the kind's vocabulary.
    ///
    /// The transaction is kept in memory even when persisting it fails; the storage error
    /// is returned as [`ServiceError::Ledger`].
    pub fn add(
        store: &mut Store,
        date: NaiveDate,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> ServiceResult<()> {
        if !kind.allows_category(category) {
            return Err(ServiceError::Invalid(format!(
                "`{category}` is not a valid {} category",
                kind.as_str().to_lowercase()
            )));
        }
        let transaction = Transaction::new(date, kind, category, amount, description)
            .map_err(|err| ServiceError::Invalid(err.to_string()))?;
        store.add(transaction)?;
        Ok(())
    }

    /// Parses a user-supplied amount. Amounts are magnitudes, so negatives are refused, and
    /// values above [`max_amount`] are refused as well.
    pub fn parse_amount(raw: &str) -> ServiceResult<Decimal> {
        let amount = parse_amount(raw)
            .map_err(|_| ServiceError::Invalid("Invalid amount. Please enter a number.".into()))?;
        if amount < Decimal::ZERO {
            return Err(ServiceError::Invalid(
                "Amount must not be negative.".into(),
            ));
        }
        if amount > max_amount() {
            return Err(ServiceError::Invalid(format!(
                "Amount must not exceed {}.",
                max_amount()
            )));
        }
        Ok(amount)
    }

    /// Parses a user-supplied `yyyy-MM-dd` date, falling back to today when it does not parse.
    pub fn resolve_date(raw: &str, clock: &dyn Clock) -> EntryDate {
        match parse_date(raw) {
            Ok(date) => EntryDate {
                date,
                substituted: false,
            },
            Err(err) => {
                let today = clock.today();
                tracing::warn!(input = raw, %today, "using current date: {err}");
                EntryDate {
                    date: today,
                    substituted: true,
                }
            }
        }
    }
}

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::LedgerError;

use super::transaction::{Transaction, TransactionKind};

fn add(total: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    total
        .checked_add(amount)
        .ok_or(LedgerError::Overflow("summing monthly totals"))
}

/// Aggregate report for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    /// Summed amount per category across both kinds. Iteration order is unspecified.
    pub category_totals: HashMap<String, Decimal>,
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Folds every transaction dated in `month`/`year` into totals.
    ///
    /// Transactions from other months are ignored. An empty month yields zero totals and an
    /// empty category map. Sums that would exceed the `Decimal` range fail with
    /// [`LedgerError::Overflow`] instead of wrapping or panicking.
    pub fn compute<'a, I>(transactions: I, month: u32, year: i32) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut category_totals: HashMap<String, Decimal> = HashMap::new();
        let mut transaction_count = 0;

        for txn in transactions
            .into_iter()
            .filter(|txn| txn.occurs_in(month, year))
        {
            let total = match txn.kind() {
                TransactionKind::Income => &mut total_income,
                TransactionKind::Expense => &mut total_expense,
            };
            *total = add(*total, txn.amount())?;
            let category = category_totals
                .entry(txn.category().to_string())
                .or_insert(Decimal::ZERO);
            *category = add(*category, txn.amount())?;
            transaction_count += 1;
        }

        let net_balance = total_income
            .checked_sub(total_expense)
            .ok_or(LedgerError::Overflow("computing the net balance"))?;
        Ok(Self {
            month,
            year,
            total_income,
            total_expense,
            net_balance,
            category_totals,
            transaction_count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Category totals ordered by descending amount, then by name.
    pub fn sorted_categories(&self) -> Vec<(&str, Decimal)> {
        let mut rows: Vec<(&str, Decimal)> = self
            .category_totals
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

//! Fixed category vocabularies, one per transaction kind.

use super::transaction::TransactionKind;

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Business"];
pub const EXPENSE_CATEGORIES: &[&str] = &["Food", "Rent", "Travel"];

/// Returns the categories a caller may offer for the given kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

//! Ledger domain models: transactions, category vocabularies, and monthly aggregation.

pub mod category;
pub mod summary;
pub mod transaction;

pub use category::{categories_for, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use summary::MonthlySummary;
pub use transaction::{
    format_amount, max_amount, parse_amount, parse_date, round_amount, Transaction,
    TransactionKind, DATE_FORMAT,
};

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::category;

/// Date layout used by the storage file and by user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Number of fraction digits kept for every amount.
pub const AMOUNT_SCALE: u32 = 2;
/// Number of fields in one serialized transaction.
pub const FIELD_COUNT: usize = 5;

/// Largest amount a single transaction may carry: 999,999,999,999.99.
///
/// Kept far below `Decimal::MAX` so the amount always fits two fraction digits and
/// monthly totals cannot overflow.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, AMOUNT_SCALE)
}

/// Direction of a transaction. Amounts are always magnitudes; the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// Categories that callers may pair with this kind.
    pub fn categories(&self) -> &'static [&'static str] {
        category::categories_for(*self)
    }

    pub fn allows_category(&self, name: &str) -> bool {
        self.categories().contains(&name)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the stored spelling exactly: `Income` or `Expense`.
impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TransactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| LedgerError::Validation(format!("unknown transaction kind `{value}`")))
    }
}

/// One recorded income or expense. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    description: String,
}

impl Transaction {
    /// Builds a transaction, rounding `amount` to two decimals.
    ///
    /// The category is not checked against the kind's vocabulary here; callers that accept
    /// user input go through `TransactionService`, which does. Text fields may not contain
    /// line breaks, since each transaction occupies exactly one line in storage.
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(LedgerError::Validation("category must not be empty".into()));
        }
        let description = description.into();
        if has_line_break(&category) || has_line_break(&description) {
            return Err(LedgerError::Validation(
                "category and description must fit on one line".into(),
            ));
        }
        if amount < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must not be negative, got {amount}"
            )));
        }
        let amount = round_amount(amount);
        if amount > max_amount() {
            return Err(LedgerError::Validation(format!(
                "amount must not exceed {}, got {amount}",
                max_amount()
            )));
        }
        Ok(Self {
            date,
            kind,
            category,
            amount,
            description,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when the transaction falls in the given calendar month.
    pub fn occurs_in(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }

    /// Storage fields in file order: date, kind, category, amount, description.
    pub fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.date.format(DATE_FORMAT).to_string(),
            self.kind.to_string(),
            self.category.clone(),
            format_amount(self.amount),
            self.description.clone(),
        ]
    }

    /// Rebuilds a transaction from storage fields. The slice must hold exactly five entries.
    pub fn from_fields(fields: &[&str]) -> Result<Self, LedgerError> {
        let [date, kind, category, amount, description] = fields else {
            return Err(LedgerError::Validation(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        };
        Self::new(
            parse_date(date)?,
            kind.parse()?,
            *category,
            parse_amount(amount)?,
            *description,
        )
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Rounds half away from zero to the storage precision.
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

/// Formats an amount with exactly two fraction digits, e.g. `1000.00`.
pub fn format_amount(amount: Decimal) -> String {
    round_amount(amount).to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| LedgerError::Validation(format!("invalid date `{}`: {err}", raw.trim())))
}

pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(raw.trim())
        .map_err(|err| LedgerError::Validation(format!("invalid amount `{}`: {err}", raw.trim())))
}

use rust_decimal::Decimal;

use crate::ledger::{format_amount, MonthlySummary};

/// Formats an amount with the currency symbol, keeping the sign in front: `-$12.50`.
pub fn money(amount: Decimal, symbol: &str) -> String {
    if amount < Decimal::ZERO {
        format!("-{symbol}{}", format_amount(amount.abs()))
    } else {
        format!("{symbol}{}", format_amount(amount))
    }
}

/// Heading shown above a monthly summary.
pub fn summary_title(summary: &MonthlySummary) -> String {
    format!("Monthly Summary for {}/{}", summary.month, summary.year)
}

/// Renders the totals and the category breakdown, one line per entry.
pub fn render_summary(summary: &MonthlySummary, symbol: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Total Income: {}", money(summary.total_income, symbol)),
        format!("Total Expense: {}", money(summary.total_expense, symbol)),
        format!("Net Balance: {}", money(summary.net_balance, symbol)),
        String::new(),
        String::from("Category Breakdown:"),
    ];
    if summary.is_empty() {
        lines.push(String::from("  (no transactions this month)"));
    }
    for (category, total) in summary.sorted_categories() {
        lines.push(format!("{category}: {}", money(total, symbol)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use super::*;
    use crate::ledger::Transaction;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn money_places_sign_before_symbol() {
        assert_eq!(money(dec("950"), "$"), "$950.00");
        assert_eq!(money(dec("-350.5"), "$"), "-$350.50");
        assert_eq!(money(Decimal::ZERO, "€"), "€0.00");
    }

    #[test]
    fn render_summary_lists_totals_then_categories() {
        let summary = MonthlySummary {
            month: 1,
            year: 2025,
            total_income: dec("1000.00"),
            total_expense: dec("50.00"),
            net_balance: dec("950.00"),
            category_totals: HashMap::from([
                ("Food".to_string(), dec("50.00")),
                ("Salary".to_string(), dec("1000.00")),
            ]),
            transaction_count: 2,
        };

        assert_eq!(summary_title(&summary), "Monthly Summary for 1/2025");
        assert_eq!(
            render_summary(&summary, "$"),
            vec![
                "Total Income: $1000.00",
                "Total Expense: $50.00",
                "Net Balance: $950.00",
                "",
                "Category Breakdown:",
                "Salary: $1000.00",
                "Food: $50.00",
            ]
        );
    }

    #[test]
    fn render_summary_marks_empty_months() {
        let none: Vec<Transaction> = Vec::new();
        let summary = MonthlySummary::compute(&none, 2, 2025).unwrap();
        let lines = render_summary(&summary, "$");
        assert_eq!(lines[0], "Total Income: $0.00");
        assert_eq!(lines[2], "Net Balance: $0.00");
        assert_eq!(lines.last().unwrap(), "  (no transactions this month)");
    }
}

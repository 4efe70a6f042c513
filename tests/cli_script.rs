use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::fs;
use tempfile::TempDir;

const BIN_NAME: &str = "expense_ledger_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_LEDGER_CLI_SCRIPT", "1")
        .env("EXPENSE_LEDGER_HOME", home.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn first_run_starts_fresh_and_exits() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(contains("Starting fresh").and(contains("Exiting...")));

    let config = fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains("\"currency_symbol\": \"$\""));
}

#[test]
fn added_transactions_show_up_in_summary_after_restart() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("1\n1\n1\n1000\nPaycheck\n2025-01-15\n1\n2\n1\n50\nGroceries\n2025-01-20\n3\n")
        .assert()
        .success()
        .stdout(contains("Transaction added successfully!"));

    let data = fs::read_to_string(home.path().join("data.txt")).unwrap();
    assert_eq!(
        data,
        "2025-01-15,Income,Salary,1000.00,Paycheck\n2025-01-20,Expense,Food,50.00,Groceries\n"
    );

    script_command(&home)
        .write_stdin("2\n1\n2025\n3\n")
        .assert()
        .success()
        .stdout(
            contains("Loaded 2 transactions")
                .and(contains("Monthly Summary for 1/2025"))
                .and(contains("Total Income: $1000.00"))
                .and(contains("Total Expense: $50.00"))
                .and(contains("Net Balance: $950.00"))
                .and(contains("Salary: $1000.00"))
                .and(contains("Food: $50.00")),
        );
}

#[test]
fn invalid_menu_choice_is_reported_and_loop_continues() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("7\n2\nMarch\n2025\n3\n")
        .assert()
        .success()
        .stdout(
            contains("Please enter 1, 2, or 3.")
                .and(contains("Please enter numeric month and year."))
                .and(contains("Exiting...")),
        );
}

#[test]
fn currency_symbol_comes_from_config() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.json"),
        r#"{ "currency_symbol": "€", "color": false }"#,
    )
    .unwrap();
    fs::write(
        home.path().join("data.txt"),
        "2025-02-01,Expense,Rent,900.00,February rent\n",
    )
    .unwrap();

    script_command(&home)
        .write_stdin("2\n2\n2025\n3\n")
        .assert()
        .success()
        .stdout(contains("Total Expense: €900.00").and(contains("Net Balance: -€900.00")));

    let config = fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains("€"), "existing config is left alone");
}

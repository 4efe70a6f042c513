use crate::config::Config;
use crate::core::services::{CategoryService, ServiceError, SummaryService, TransactionService};
use crate::core::{Clock, Store};
use crate::ledger::TransactionKind;

use super::{format, output, prompt::Prompter, CliError};

const MAIN_MENU: [&str; 3] = ["Add Transaction", "View Monthly Summary", "Exit"];
const KIND_MENU: [&str; 2] = ["Income", "Expense"];

/// Menu loop over a single ledger.
pub struct Shell {
    store: Store,
    prompter: Box<dyn Prompter>,
    clock: Box<dyn Clock>,
    config: Config,
}

impl Shell {
    pub fn new(
        store: Store,
        prompter: Box<dyn Prompter>,
        clock: Box<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            store,
            prompter,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs until the user exits or input ends. Bad answers are reported and the menu is
    /// shown again.
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            output::section("Expense Tracker Menu");
            let choice = match self.prompter.select("Choose an option", &MAIN_MENU) {
                Ok(Some(choice)) => choice,
                Ok(None) => break,
                Err(CliError::Input(message)) => {
                    output::error(format!("{message} Please enter 1, 2, or 3."));
                    continue;
                }
                Err(err) => return Err(err),
            };

            let result = match choice {
                0 => self.add_transaction(),
                1 => self.show_monthly_summary(),
                _ => break,
            };
            match result {
                Ok(()) => {}
                Err(CliError::Input(message)) => output::error(message),
                Err(CliError::Service(ServiceError::Invalid(message))) => output::error(message),
                Err(CliError::Service(ServiceError::Ledger(err))) => output::error(err),
                Err(CliError::ExitRequested) => break,
                Err(err) => return Err(err),
            }
        }
        output::info("Exiting...");
        Ok(())
    }

    fn ask_text(&mut self, prompt: &str) -> Result<String, CliError> {
        self.prompter
            .text(prompt)?
            .ok_or(CliError::ExitRequested)
    }

    fn add_transaction(&mut self) -> Result<(), CliError> {
        let kind = match self.prompter.select("Transaction type", &KIND_MENU)? {
            Some(0) => TransactionKind::Income,
            Some(_) => TransactionKind::Expense,
            None => return Err(CliError::ExitRequested),
        };

        let categories = CategoryService::list(kind);
        let index = self
            .prompter
            .select("Choose category", categories)?
            .ok_or(CliError::ExitRequested)?;
        let category = categories
            .get(index)
            .copied()
            .ok_or_else(|| CliError::Input("Invalid category. Returning to menu.".into()))?;

        let amount = TransactionService::parse_amount(&self.ask_text("Enter amount")?)?;
        let description = self.ask_text("Enter description")?;
        let entry = TransactionService::resolve_date(
            &self.ask_text("Enter date (yyyy-MM-dd)")?,
            self.clock.as_ref(),
        );
        if entry.substituted {
            output::warning("Invalid date format. Using current date.");
        }

        match TransactionService::add(
            &mut self.store,
            entry.date,
            kind,
            category,
            amount,
            &description,
        ) {
            Ok(()) => output::success("Transaction added successfully!"),
            Err(ServiceError::Ledger(err)) => output::warning(format!(
                "Transaction kept for this session but not saved: {err}"
            )),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn show_monthly_summary(&mut self) -> Result<(), CliError> {
        let month = self.ask_text("Enter month (1-12)")?;
        let year = self.ask_text("Enter year (e.g., 2025)")?;
        let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<i32>())
        else {
            return Err(CliError::Input(
                "Invalid input. Please enter numeric month and year.".into(),
            ));
        };

        let summary = SummaryService::monthly(&self.store, month, year)?;
        output::section(format::summary_title(&summary));
        for line in format::render_summary(&summary, &self.config.currency_symbol) {
            output::info(line);
        }
        Ok(())
    }
}

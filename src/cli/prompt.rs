use std::io::{self, BufRead, Write};

use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::CliError;

/// Source of menu choices and free-form answers.
///
/// `Ok(None)` means the input ended (end of script, Esc) and the shell should stop asking.
pub trait Prompter {
    /// Picks one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>, CliError>;

    fn text(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

/// Interactive terminal prompts.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>, CliError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn text(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(value))
    }
}

/// Line-oriented prompts for scripted sessions. Each answer is one input line; a menu
/// answer may be the 1-based item number or the item label.
pub struct ScriptPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ScriptPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl ScriptPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ScriptPrompter<R, W> {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>, CliError> {
        writeln!(self.output, "{prompt}")?;
        for (index, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, item)?;
        }
        self.output.flush()?;

        let Some(answer) = self.read_line()? else {
            return Ok(None);
        };
        let answer = answer.trim();
        let by_number = answer
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .filter(|index| *index < items.len());
        let by_label = || {
            items
                .iter()
                .position(|item| item.eq_ignore_ascii_case(answer))
        };
        by_number
            .or_else(by_label)
            .map(Some)
            .ok_or_else(|| CliError::Input(format!("Invalid choice `{answer}`.")))
    }

    fn text(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;
        self.read_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> ScriptPrompter<&[u8], Vec<u8>> {
        ScriptPrompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn select_accepts_numbers_and_labels() {
        let mut prompter = prompter("2\nincome\n");
        let items = ["Income", "Expense"];
        assert_eq!(prompter.select("Type", &items).unwrap(), Some(1));
        assert_eq!(prompter.select("Type", &items).unwrap(), Some(0));
        assert_eq!(prompter.select("Type", &items).unwrap(), None);

        let printed = String::from_utf8(prompter.output).unwrap();
        assert!(printed.contains("1. Income\n2. Expense\n"));
    }

    #[test]
    fn select_rejects_unknown_answers() {
        let mut prompter = prompter("3\n");
        let err = prompter
            .select("Type", &["Income", "Expense"])
            .expect_err("out of range");
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn text_strips_line_endings_only() {
        let mut prompter = prompter("  Lunch with team \r\n");
        assert_eq!(
            prompter.text("Description").unwrap().as_deref(),
            Some("  Lunch with team ")
        );
    }
}

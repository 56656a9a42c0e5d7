//! Interactive prompts for the inputs an edit needs.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use flagreg_core::{validate_flag_name, Action, EnvironmentSet, FlagEntry};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Source of the user's choices.
pub trait Prompts {
    /// Ask what to do. Edit and remove are only offered when flags exist.
    fn action(&mut self, has_flags: bool) -> Result<Action>;

    /// Pick one of the existing flag names.
    fn select_existing_flag(&mut self, names: &[String]) -> Result<String>;

    /// Enter a name that is valid and not already taken.
    fn enter_new_flag_name(&mut self, existing: &[String]) -> Result<String>;

    /// Pick the environments the flag should be enabled in.
    fn environment_states(
        &mut self,
        environments: &EnvironmentSet,
        current: Option<&FlagEntry>,
    ) -> Result<Vec<String>>;
}

/// Line-based prompts over any reader and writer.
pub struct ConsolePrompts<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompts<StdinLock<'static>, Stdout> {
    /// Prompts on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompts<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{} ", question.bold())?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            bail!("input closed before an answer was given");
        }
        Ok(line.trim().to_string())
    }

    fn retry(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "  {}", message.yellow())?;
        Ok(())
    }

    fn list(&mut self, items: &[String]) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {} {}", format!("{})", i + 1).bright_black(), item)?;
        }
        Ok(())
    }
}

/// Match an answer against a list, by 1-based index or exact text.
fn pick<'a>(answer: &str, items: &'a [String]) -> Option<&'a String> {
    if let Ok(index) = answer.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| items.get(i));
    }
    items.iter().find(|item| item.as_str() == answer)
}

impl<R: BufRead, W: Write> Prompts for ConsolePrompts<R, W> {
    fn action(&mut self, has_flags: bool) -> Result<Action> {
        let actions = Action::available(has_flags);
        let labels: Vec<String> = actions.iter().map(|a| a.to_string()).collect();

        writeln!(self.output, "{}", "What would you like to do?".cyan())?;
        self.list(&labels)?;

        loop {
            let answer = self.ask(">")?;
            if let Some(label) = pick(&answer, &labels) {
                if let Ok(action) = label.parse::<Action>() {
                    return Ok(action);
                }
            }
            if let Ok(action) = answer.parse::<Action>() {
                if actions.contains(&action) {
                    return Ok(action);
                }
            }
            self.retry("Pick one of the listed actions.")?;
        }
    }

    fn select_existing_flag(&mut self, names: &[String]) -> Result<String> {
        if names.is_empty() {
            bail!("there are no flags to choose from");
        }

        writeln!(self.output, "{}", "Which flag?".cyan())?;
        self.list(names)?;

        loop {
            let answer = self.ask(">")?;
            if let Some(name) = pick(&answer, names) {
                return Ok(name.clone());
            }
            self.retry("Pick one of the listed flags.")?;
        }
    }

    fn enter_new_flag_name(&mut self, existing: &[String]) -> Result<String> {
        loop {
            let answer = self.ask("New flag name:")?;
            if existing.contains(&answer) {
                self.retry(&format!("A flag named {answer} already exists."))?;
                continue;
            }
            match validate_flag_name(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => self.retry(&e.to_string())?,
            }
        }
    }

    fn environment_states(
        &mut self,
        environments: &EnvironmentSet,
        current: Option<&FlagEntry>,
    ) -> Result<Vec<String>> {
        let current: Vec<String> = environments
            .iter()
            .filter(|env| current.is_some_and(|entry| entry.is_enabled_in(env)))
            .map(str::to_string)
            .collect();

        writeln!(self.output, "{}", "Enable in which environments?".cyan())?;
        for (i, env) in environments.iter().enumerate() {
            let mark = if current.iter().any(|c| c == env) {
                "[x]".green()
            } else {
                "[ ]".bright_black()
            };
            writeln!(
                self.output,
                "  {} {} {}",
                format!("{})", i + 1).bright_black(),
                mark,
                env
            )?;
        }
        writeln!(
            self.output,
            "  {}",
            "Comma-separated names or numbers, 'none' for none, empty to keep [x].".bright_black()
        )?;

        'outer: loop {
            let answer = self.ask(">")?;
            if answer.is_empty() {
                return Ok(current);
            }
            if answer == "none" || answer == "-" {
                return Ok(Vec::new());
            }

            let mut chosen = Vec::new();
            for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                match pick(part, environments.names()) {
                    Some(env) => chosen.push(env.clone()),
                    None => {
                        self.retry(&format!("Unknown environment: {part}"))?;
                        continue 'outer;
                    }
                }
            }

            return Ok(environments
                .iter()
                .filter(|env| chosen.iter().any(|c| c == env))
                .map(str::to_string)
                .collect());
        }
    }
}

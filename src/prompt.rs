use anyhow::{Context, Result};
use inquire::Confirm;
use std::collections::VecDeque;
use std::io::BufRead;

/// Yes/no questions asked by the console flow.
///
/// Handlers only talk to this trait so they can run without a terminal.
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Wait until the user is done reading
    fn pause(&mut self) -> Result<()>;
}

/// Asks on the terminal with `inquire`
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::new(question)
            .with_default(default)
            .prompt()
            .with_context(|| format!("Failed to get an answer to: {question}"))
    }

    fn pause(&mut self) -> Result<()> {
        println!("Press Enter to close.");
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(())
    }
}

/// Gives the same answer to every question without asking
pub struct FixedAnswer(pub bool);

impl Prompter for FixedAnswer {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        log::info!("{question} -> {}", if self.0 { "yes" } else { "no" });
        Ok(self.0)
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Replays a fixed list of answers, then falls back to each question's default.
///
/// Records every question it was asked. Only meant for tests.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    pub asked: Vec<String>,
    pub pauses: usize,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompter {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(default))
    }

    fn pause(&mut self) -> Result<()> {
        self.pauses += 1;
        Ok(())
    }
}

/// Pick a prompter from the `--yes` / `--no-input` flags and whether stdin is a terminal
pub fn select_prompter(assume_yes: bool, no_input: bool) -> Box<dyn Prompter> {
    if assume_yes {
        Box::new(FixedAnswer(true))
    } else if no_input || !atty::is(atty::Stream::Stdin) {
        Box::new(FixedAnswer(false))
    } else {
        Box::new(TerminalPrompter)
    }
}

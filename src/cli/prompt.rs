//! Interactive confirmation for destructive commands.

use crate::error::StateError;
use std::io::{BufRead, IsTerminal, Write};

/// Answers accepted as confirmation; matched exactly.
pub const ACCEPTED_ANSWERS: [&str; 2] = ["Y", "Yes"];

/// Asks a question and returns the raw answer line.
pub trait ConfirmationPrompt {
    fn ask(&mut self, question: &str) -> Result<String, StateError>;
}

/// Whether `answer` confirms, after removing the line terminator.
pub fn is_confirmed(answer: &str) -> bool {
    let answer = answer.trim_end_matches('\n').trim_end_matches('\r');
    ACCEPTED_ANSWERS.contains(&answer)
}

/// Prompt on the controlling terminal, or a plain line read when stdin is piped.
pub struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> Result<String, StateError> {
        if std::io::stdin().is_terminal() {
            return dialoguer::Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| StateError::Prompt(e.to_string()));
        }
        let mut stderr = std::io::stderr();
        write!(stderr, "{} ", question)?;
        stderr.flush()?;
        ReaderPrompt::new(std::io::stdin().lock()).read_answer()
    }
}

/// Reads answers from any buffered reader.
pub struct ReaderPrompt<R> {
    reader: R,
}

impl<R: BufRead> ReaderPrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_answer(&mut self) -> Result<String, StateError> {
        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| StateError::Prompt(e.to_string()))?;
        Ok(line)
    }
}

impl<R: BufRead> ConfirmationPrompt for ReaderPrompt<R> {
    fn ask(&mut self, _question: &str) -> Result<String, StateError> {
        self.read_answer()
    }
}

/// Question asked before removing a stack's remote state.
pub fn removal_question(id: &str) -> String {
    format!(
        "Do you really want to remove the remote state of the stack [{}]? (type Y or Yes)",
        id
    )
}

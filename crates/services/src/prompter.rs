use std::collections::VecDeque;
use std::io;

use thiserror::Error;

/// Errors surfaced while talking to the terminal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptError {
    #[error("input ended")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The terminal seam the review loop talks through.
///
/// `show` writes one line of output; `prompt` displays a message and blocks
/// for one line of input. Production wraps stdin/stdout; tests drive the
/// loop with [`ScriptedPrompter`].
pub trait Prompter {
    /// Write one line of output.
    ///
    /// # Errors
    ///
    /// Returns `PromptError` if the terminal cannot be written.
    fn show(&mut self, line: &str) -> Result<(), PromptError>;

    /// Display `message` and block for one line of input.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Closed` when input has ended.
    fn prompt(&mut self, message: &str) -> Result<String, PromptError>;
}

/// Scripted prompter for tests: replies are served in order, and everything
/// shown or asked is recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every line shown or prompted so far, in order.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// True if some scripted replies were never consumed.
    #[must_use]
    pub fn has_unused_replies(&self) -> bool {
        !self.replies.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn show(&mut self, line: &str) -> Result<(), PromptError> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<String, PromptError> {
        self.transcript.push(message.to_string());
        self.replies.pop_front().ok_or(PromptError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompter_serves_replies_in_order() {
        let mut prompter = ScriptedPrompter::new(["first", "second"]);
        assert_eq!(prompter.prompt("a?").unwrap(), "first");
        assert_eq!(prompter.prompt("b?").unwrap(), "second");
        assert!(matches!(
            prompter.prompt("c?").unwrap_err(),
            PromptError::Closed
        ));
    }

    #[test]
    fn scripted_prompter_records_the_transcript() {
        let mut prompter = ScriptedPrompter::new(["x"]);
        prompter.show("hello").unwrap();
        let _ = prompter.prompt("question").unwrap();
        assert_eq!(prompter.transcript(), ["hello", "question"]);
    }
}

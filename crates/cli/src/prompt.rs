//! Terminal implementation of the session `Prompter`.

use std::io::{self, BufRead, Write};

use services::{PromptError, Prompter};

/// Prompter over a line-buffered reader and a writer. Production wraps
/// stdin/stdout; tests drive it with in-memory buffers.
pub struct StdinPrompter<R, W> {
    input: R,
    output: W,
}

impl StdinPrompter<io::BufReader<io::Stdin>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> StdinPrompter<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for StdinPrompter<R, W> {
    fn show(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<String, PromptError> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_one_line_without_the_newline() {
        let input = Cursor::new(b"hello\nworld\n".to_vec());
        let mut prompter = StdinPrompter::new(input, Vec::new());

        assert_eq!(prompter.prompt("Say something:").unwrap(), "hello");
        assert_eq!(prompter.prompt("Again:").unwrap(), "world");
    }

    #[test]
    fn prompt_fails_with_closed_at_end_of_input() {
        let input = Cursor::new(Vec::new());
        let mut prompter = StdinPrompter::new(input, Vec::new());

        assert!(matches!(
            prompter.prompt("Anyone there?"),
            Err(PromptError::Closed)
        ));
    }

    #[test]
    fn show_writes_the_line_and_prompt_writes_the_message() {
        let input = Cursor::new(b"ok\n".to_vec());
        let mut prompter = StdinPrompter::new(input, Vec::new());

        prompter.show("Word: 별").unwrap();
        let _ = prompter.prompt("Rate it:").unwrap();

        let output = String::from_utf8(prompter.output).unwrap();
        assert_eq!(output, "Word: 별\nRate it: ");
    }

    #[test]
    fn windows_line_endings_are_stripped() {
        let input = Cursor::new(b"3\r\n".to_vec());
        let mut prompter = StdinPrompter::new(input, Vec::new());
        assert_eq!(prompter.prompt("Rate it:").unwrap(), "3");
    }
}

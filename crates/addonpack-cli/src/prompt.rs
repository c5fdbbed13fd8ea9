//! Terminal side of the version prompt.

use addonpack_core::PromptIo;
use console::Term;
use std::io;
use std::io::BufRead;

/// Question asked before packing.
pub const VERSION_QUESTION: &str = "Which Minecraft version do you want to pack?";

/// Prompt exchange over a terminal for output and a line reader for input.
///
/// Input is read line by line from any `BufRead`, so piped stdin works the
/// same as an interactive terminal.
pub struct ConsolePrompt<R> {
    input: R,
    term: Term,
}

impl ConsolePrompt<io::StdinLock<'static>> {
    /// Reads from stdin and writes to `term`.
    pub fn stdin(term: Term) -> Self {
        Self::new(io::stdin().lock(), term)
    }
}

impl<R: BufRead> ConsolePrompt<R> {
    pub fn new(input: R, term: Term) -> Self {
        Self { input, term }
    }
}

impl<R: BufRead> PromptIo for ConsolePrompt<R> {
    fn show(&mut self, message: &str) -> io::Result<()> {
        self.term.write_line(message)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Shows `message` and blocks until a line (or end of input) arrives.
pub fn wait_for_enter(io: &mut dyn PromptIo, message: &str) -> io::Result<()> {
    io.show(message)?;
    io.read_line().map(|_| ())
}

//! Interactive version prompt.
//!
//! The prompt is a small state machine driven through [`PromptIo`], so it can
//! be exercised with scripted input:
//!
//! ```text
//! AwaitingInput --line--> Validating --ok--> AwaitingConfirmation --yes--> Accepted
//!       ^                     |                     |
//!       +------invalid--------+                     |
//!       +----------------------------no-------------+
//! ```
//!
//! Closed input in any waiting state ends the prompt with
//! [`PackError::Interrupted`].

use crate::PackError;
use crate::Result;
use crate::version::VersionTag;

/// Line-based exchange with the operator.
pub trait PromptIo {
    /// Shows a message to the operator.
    fn show(&mut self, message: &str) -> std::io::Result<()>;

    /// Reads one line without its line ending. `None` means input is closed.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Where the prompt currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    /// Waiting for the operator to type a version.
    AwaitingInput,

    /// A line was read and is about to be checked.
    Validating(String),

    /// A valid version waits for a yes/no answer.
    AwaitingConfirmation(VersionTag),

    /// Final state.
    Accepted(VersionTag),
}

/// Parses a yes/no answer, ignoring case and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use addonpack_core::prompt::parse_confirmation;
///
/// assert_eq!(parse_confirmation("Y"), Some(true));
/// assert_eq!(parse_confirmation("no"), Some(false));
/// assert_eq!(parse_confirmation("maybe"), None);
/// ```
#[must_use]
pub fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Asks for a version tag until a valid one is entered and confirmed.
#[derive(Debug, Clone)]
pub struct VersionPrompt {
    question: String,
    confirm: bool,
    state: PromptState,
}

impl VersionPrompt {
    /// Creates a prompt asking `question`, with confirmation enabled.
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            confirm: true,
            state: PromptState::AwaitingInput,
        }
    }

    /// Enables or disables the yes/no confirmation round-trip.
    #[must_use]
    pub fn with_confirmation(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    /// Starts from an already validated `tag` instead of asking for one.
    ///
    /// The tag still goes through confirmation when it is enabled; declining
    /// it falls back to the question.
    #[must_use]
    pub fn with_candidate(mut self, tag: VersionTag) -> Self {
        self.state = PromptState::AwaitingConfirmation(tag);
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// Performs a single transition.
    ///
    /// Does nothing once the prompt is accepted.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Interrupted` if input closes while waiting, and
    /// `PackError::Io` if the exchange itself fails.
    pub fn step(&mut self, io: &mut dyn PromptIo) -> Result<()> {
        let next = match std::mem::replace(&mut self.state, PromptState::AwaitingInput) {
            PromptState::AwaitingInput => {
                io.show(&self.question)?;
                let line = io.read_line()?.ok_or(PackError::Interrupted)?;
                PromptState::Validating(line)
            }
            PromptState::Validating(line) => match VersionTag::parse(line.trim()) {
                Ok(tag) if self.confirm => PromptState::AwaitingConfirmation(tag),
                Ok(tag) => PromptState::Accepted(tag),
                Err(e) => {
                    io.show(&format!("{e}"))?;
                    PromptState::AwaitingInput
                }
            },
            PromptState::AwaitingConfirmation(tag) if !self.confirm => PromptState::Accepted(tag),
            PromptState::AwaitingConfirmation(tag) => {
                io.show(&format!("You entered '{tag}'. Is that correct? (Y/N)"))?;
                let answer = io.read_line()?.ok_or(PackError::Interrupted)?;
                match parse_confirmation(&answer) {
                    Some(true) => PromptState::Accepted(tag),
                    Some(false) => PromptState::AwaitingInput,
                    None => PromptState::AwaitingConfirmation(tag),
                }
            }
            accepted @ PromptState::Accepted(_) => accepted,
        };
        self.state = next;
        Ok(())
    }

    /// Runs the prompt to completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use addonpack_core::prompt::{PromptIo, VersionPrompt};
    /// use std::collections::VecDeque;
    ///
    /// struct Scripted(VecDeque<&'static str>);
    ///
    /// impl PromptIo for Scripted {
    ///     fn show(&mut self, _message: &str) -> std::io::Result<()> {
    ///         Ok(())
    ///     }
    ///
    ///     fn read_line(&mut self) -> std::io::Result<Option<String>> {
    ///         Ok(self.0.pop_front().map(str::to_string))
    ///     }
    /// }
    ///
    /// let mut io = Scripted(VecDeque::from(["1.2", "1.2.3", "yes"]));
    /// let tag = VersionPrompt::new("Which version?").run(&mut io)?;
    /// assert_eq!(tag.as_str(), "1.2.3");
    /// # Ok::<(), addonpack_core::PackError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// See [`VersionPrompt::step`].
    pub fn run(mut self, io: &mut dyn PromptIo) -> Result<VersionTag> {
        loop {
            if let PromptState::Accepted(tag) = self.state {
                return Ok(tag);
            }
            self.step(io)?;
        }
    }
}

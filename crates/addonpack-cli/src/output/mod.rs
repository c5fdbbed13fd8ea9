//! Output formatting: styled console text or JSON documents.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use crate::cli::Cli;
use human::HumanFormatter;
use json::JsonFormatter;

/// Output switches shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl OutputOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }

    /// Whether decorations such as progress bars may be drawn.
    pub fn decorated(self) -> bool {
        !self.json && !self.quiet
    }
}

/// Creates an output formatter based on CLI flags
pub fn create_formatter(options: OutputOptions) -> Box<dyn OutputFormatter> {
    if options.json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(options.verbose, options.quiet))
    }
}

//! addonpack - Command-line utility for packaging add-on resource packs
//! into versioned ZIP archives.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;
mod prompt;

use clap::Parser;
use console::Term;
use std::process::ExitCode;

/// Exit status used when the operator interrupts the run.
const EXIT_INTERRUPTED: u8 = 130;

/// Prints the interrupt message and exits immediately on Ctrl+C.
fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        let term = Term::stderr();
        let _ = term.show_cursor();
        let _ = term.write_line("");
        let _ = term.write_line(error::INTERRUPTED_MESSAGE);
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    })
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.quiet) {
        let _ = Term::stderr().write_line(&format!("WARNING: logging disabled: {e}"));
    }
    if let Err(e) = install_interrupt_handler() {
        tracing::warn!(error = %e, "Ctrl+C handler not installed");
    }

    let options = output::OutputOptions::from_cli(&cli);
    let formatter = output::create_formatter(options);

    let result = match &cli.command {
        cli::Commands::Pack(args) => commands::pack::execute(args, &*formatter, options),
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if error::is_interrupt(&e) => {
            let _ = Term::stderr().write_line(&format!("\n{}", error::INTERRUPTED_MESSAGE));
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            formatter.format_error(&e);
            ExitCode::FAILURE
        }
    }
}

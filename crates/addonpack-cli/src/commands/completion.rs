//! Shell completion generation command.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;
use std::io::Write;

/// Binary name completions are registered for.
const BIN_NAME: &str = "addonpack";

/// Writes completions for `shell` to `out`.
pub fn generate(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

/// Prints completions for `shell` to stdout.
pub fn execute(shell: Shell) {
    generate(shell, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_generation() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            let mut output = Vec::new();
            generate(shell, &mut output);
            let script = String::from_utf8_lossy(&output);
            assert!(script.contains(BIN_NAME), "no completions for {shell:?}");
        }
    }

    #[test]
    fn test_bash_completion_lists_subcommands() {
        let mut output = Vec::new();
        generate(Shell::Bash, &mut output);
        let script = String::from_utf8_lossy(&output);
        assert!(script.contains("pack"));
        assert!(script.contains("list"));
    }
}

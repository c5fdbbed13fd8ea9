//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "addonpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack every add-on resolution into a versioned ZIP
    Pack(PackArgs),
    /// List add-ons, resolutions and the content that would be packed
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Working root containing add-on directories (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Version tag to pack (MAJOR.MINOR.PATCH); prompts when omitted
    #[arg(short = 't', long, value_name = "VERSION")]
    pub tag: Option<String>,

    /// Skip the confirmation question
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Directory packs are written to (default: the working root)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, default_value = "6", value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: u8,

    /// Wait for Enter before exiting
    #[arg(long)]
    pub pause: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Working root containing add-on directories (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

/// Resolves the working root, defaulting to the current directory.
pub fn resolve_root(root: Option<&PathBuf>) -> std::io::Result<PathBuf> {
    match root {
        Some(root) => Ok(root.clone()),
        None => std::env::current_dir(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pack_defaults() {
        let cli = Cli::try_parse_from(["addonpack", "pack"]).unwrap();
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack command");
        };
        assert!(args.root.is_none());
        assert!(args.tag.is_none());
        assert!(!args.yes);
        assert_eq!(args.compression_level, 6);
    }

    #[test]
    fn test_parse_pack_flags() {
        let cli = Cli::try_parse_from([
            "addonpack", "pack", "addons", "--tag", "1.2.3", "-y", "-l", "9", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack command");
        };
        assert_eq!(args.root, Some(PathBuf::from("addons")));
        assert_eq!(args.tag.as_deref(), Some("1.2.3"));
        assert!(args.yes);
        assert_eq!(args.compression_level, 9);
    }

    #[test]
    fn test_compression_level_range() {
        assert!(Cli::try_parse_from(["addonpack", "pack", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["addonpack", "pack", "-l", "10"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["addonpack", "list", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_resolve_root() {
        let explicit = PathBuf::from("/packs");
        assert_eq!(resolve_root(Some(&explicit)).unwrap(), explicit);
        assert_eq!(
            resolve_root(None).unwrap(),
            std::env::current_dir().unwrap()
        );
    }
}

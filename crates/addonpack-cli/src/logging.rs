//! Diagnostic logging setup.
//!
//! Log records go to stderr so they never mix with pack output or JSON on
//! stdout. `RUST_LOG` overrides the level chosen from the CLI flags.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Returns the default filter directive for the given verbosity.
fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "addonpack_core=debug,addonpack=debug,warn"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(verbose: bool, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose, quiet)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

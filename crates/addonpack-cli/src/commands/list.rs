//! List command implementation

use crate::cli::ListArgs;
use crate::cli::resolve_root;
use crate::output::OutputFormatter;
use addonpack_core::PackerConfig;
use addonpack_core::discovery::Discovery;
use anyhow::Context;
use anyhow::Result;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = resolve_root(args.root.as_ref()).context("cannot determine working root")?;
    let discovery = Discovery::scan(&root, &PackerConfig::default());
    formatter.format_listing(&discovery)
}

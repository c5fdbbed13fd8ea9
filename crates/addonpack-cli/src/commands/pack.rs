//! Pack command implementation

use crate::cli::PackArgs;
use crate::cli::resolve_root;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;
use crate::output::OutputOptions;
use crate::progress::CliProgress;
use crate::prompt::ConsolePrompt;
use crate::prompt::VERSION_QUESTION;
use crate::prompt::wait_for_enter;
use addonpack_core::NoopProgress;
use addonpack_core::PackObserver;
use addonpack_core::PackOutcome;
use addonpack_core::PackTarget;
use addonpack_core::Packer;
use addonpack_core::PackerConfig;
use addonpack_core::ProgressCallback;
use addonpack_core::PromptIo;
use addonpack_core::VersionPrompt;
use addonpack_core::VersionTag;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use console::Term;
use tracing::debug;

/// Forwards pack events to the formatter and drives per-pack progress bars.
struct CliObserver<'a> {
    formatter: &'a dyn OutputFormatter,
    show_progress: bool,
}

impl PackObserver for CliObserver<'_> {
    fn on_pack_start(&mut self, target: &PackTarget, files: usize) -> Box<dyn ProgressCallback> {
        debug!(pack = %target.name, files, "packing");
        if self.show_progress {
            Box::new(CliProgress::new(files, &target.name))
        } else {
            Box::new(NoopProgress)
        }
    }

    fn on_pack_finished(&mut self, outcome: &PackOutcome) {
        self.formatter.format_pack_outcome(outcome);
    }
}

pub fn execute(
    args: &PackArgs,
    formatter: &dyn OutputFormatter,
    options: OutputOptions,
) -> Result<()> {
    let root = resolve_root(args.root.as_ref()).context("cannot determine working root")?;
    let config = PackerConfig::new()
        .with_compression_level(args.compression_level)
        .with_output_dir(args.output_dir.clone());
    let packer = Packer::new(&root, config).map_err(|e| convert_pack_error(e, &root))?;

    let candidate = args
        .tag
        .as_deref()
        .map(VersionTag::parse)
        .transpose()
        .map_err(|e| convert_pack_error(e, &root))?;

    // Prompts stay off stdout when it carries JSON.
    let term = if options.json {
        Term::stderr()
    } else {
        Term::stdout()
    };
    let mut io = ConsolePrompt::stdin(term);

    let show_progress = options.decorated() && CliProgress::should_show();
    let result = run(&packer, candidate, args.yes, formatter, &mut io, show_progress);

    if args.pause {
        let _ = wait_for_enter(&mut io, "Press Enter to exit...");
    }

    result
}

fn run(
    packer: &Packer,
    candidate: Option<VersionTag>,
    skip_confirmation: bool,
    formatter: &dyn OutputFormatter,
    io: &mut dyn PromptIo,
    show_progress: bool,
) -> Result<()> {
    let discovery = packer.discover();
    if discovery.is_empty_root() {
        return formatter.format_no_addons();
    }
    formatter.format_preview(&discovery);

    let mut prompt = VersionPrompt::new(VERSION_QUESTION).with_confirmation(!skip_confirmation);
    if let Some(tag) = candidate {
        prompt = prompt.with_candidate(tag);
    }
    let version = prompt
        .run(io)
        .map_err(|e| convert_pack_error(e, packer.root()))?;

    formatter.format_packing_started(discovery.pack_count());
    let mut observer = CliObserver {
        formatter,
        show_progress,
    };
    let report = packer
        .pack_all(&discovery, &version, &mut observer)
        .map_err(|e| convert_pack_error(e, packer.root()))?;
    formatter.format_run_report(&version, &report)?;

    if report.has_failures() {
        bail!(
            "{} of {} pack(s) could not be written",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}

//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use addonpack_core::Discovery;
use addonpack_core::PackOutcome;
use addonpack_core::PackReport;
use addonpack_core::RunReport;
use addonpack_core::VersionTag;
use anyhow::Result;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn write_discovery(&self, discovery: &Discovery) {
        for addon in &discovery.addons {
            if self.use_colors {
                let _ = self.term.write_line(&format!(
                    "Add-on found: {}",
                    style(&addon.name).cyan().bold()
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("Add-on found: {}", addon.name));
            }

            for resolution in &addon.resolutions {
                let _ = self
                    .term
                    .write_line(&format!("  Resolution found: {}", resolution.name));
                let _ = self.term.write_line(&format!(
                    "  Files included: {}",
                    format_preview_list(&resolution.preview)
                ));
            }
        }
    }

    fn write_pack_details(&self, report: &PackReport) {
        let _ = self
            .term
            .write_line(&format!("  Files added:      {}", report.files_added));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            humanize_bytes(report.bytes_written)
        ));
        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                humanize_bytes(report.bytes_compressed)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }
        let _ = self
            .term
            .write_line(&format!("  Duration:         {:?}", report.duration));
    }
}

/// Renders a preview list as `a, b, c`, or `(none)` when empty.
fn format_preview_list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_preview(&self, discovery: &Discovery) {
        if self.quiet {
            return;
        }
        self.write_discovery(discovery);
    }

    fn format_listing(&self, discovery: &Discovery) -> Result<()> {
        if discovery.is_empty_root() {
            return self.format_no_addons();
        }
        if self.quiet {
            return Ok(());
        }

        if !discovery.addons.is_empty() {
            self.write_discovery(discovery);
            let _ = self.term.write_line("");
        }
        let _ = self.term.write_line(&format!(
            "{} add-on(s), {} pack(s) to build",
            discovery.addons.len(),
            discovery.pack_count()
        ));
        Ok(())
    }

    fn format_no_addons(&self) -> Result<()> {
        if !self.quiet {
            self.term.write_line("No add-ons found!")?;
        }
        Ok(())
    }

    fn format_packing_started(&self, pack_count: usize) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line("");
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("Packing add-ons ({pack_count} packs)..."));
        } else {
            let _ = self.term.write_line("Packing add-ons...");
        }
        let _ = self.term.write_line("");
    }

    fn format_pack_outcome(&self, outcome: &PackOutcome) {
        match &outcome.result {
            Ok(report) => {
                if !self.quiet {
                    let message = format!("Packed {}!", outcome.target.name);
                    self.format_success(&message);
                    if self.verbose {
                        self.write_pack_details(report);
                    }
                }
                for warning in &report.warnings {
                    self.format_warning(&format!("{}: {warning}", outcome.target.name));
                }
            }
            Err(e) => {
                let error = anyhow::anyhow!("Failed to pack {}: {e}", outcome.target.name);
                self.format_error(&error);
            }
        }
    }

    fn format_run_report(&self, version: &VersionTag, report: &RunReport) -> Result<()> {
        if report.has_failures() {
            let line = format!(
                "{} of {} pack(s) failed for version {version}",
                report.failed(),
                report.outcomes.len()
            );
            if self.use_colors {
                self.err_term
                    .write_line(&format!("{}", style(line).red().bold()))?;
            } else {
                self.err_term.write_line(&line)?;
            }
            return Ok(());
        }

        if self.verbose && !self.quiet {
            self.term.write_line("")?;
            self.term.write_line(&format!(
                "Packed {} pack(s) for version {version}",
                report.succeeded()
            ))?;
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}

//! JSON output formatter for machine-readable results.
//!
//! Each command prints exactly one JSON document on stdout. Errors and
//! warnings go to stderr as separate compact documents.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use addonpack_core::Discovery;
use addonpack_core::PackOutcome;
use addonpack_core::RunReport;
use addonpack_core::VersionTag;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct ResolutionData {
    name: String,
    files: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddonData {
    name: String,
    resolutions: Vec<ResolutionData>,
}

#[derive(Debug, Serialize)]
struct ListData {
    root: String,
    addons: Vec<AddonData>,
    pack_count: usize,
}

#[derive(Debug, Serialize)]
struct PackData {
    name: String,
    addon: String,
    resolution: String,
    output_path: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    files_added: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_compressed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunData {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    packs: Vec<PackData>,
    succeeded: usize,
    failed: usize,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn diagnostic<T: Serialize>(value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }

    fn list_data(discovery: &Discovery) -> ListData {
        ListData {
            root: discovery.root.display().to_string(),
            addons: discovery
                .addons
                .iter()
                .map(|addon| AddonData {
                    name: addon.name.clone(),
                    resolutions: addon
                        .resolutions
                        .iter()
                        .map(|res| ResolutionData {
                            name: res.name.clone(),
                            files: res.preview.clone(),
                        })
                        .collect(),
                })
                .collect(),
            pack_count: discovery.pack_count(),
        }
    }

    fn pack_data(outcome: &PackOutcome) -> PackData {
        let target = &outcome.target;
        let mut data = PackData {
            name: target.name.clone(),
            addon: target.addon.clone(),
            resolution: target.resolution.clone(),
            output_path: target.output.display().to_string(),
            success: outcome.is_success(),
            files_added: None,
            bytes_written: None,
            bytes_compressed: None,
            duration_ms: None,
            warnings: Vec::new(),
            error: None,
        };

        match &outcome.result {
            Ok(report) => {
                data.files_added = Some(report.files_added);
                data.bytes_written = Some(report.bytes_written);
                data.bytes_compressed = Some(report.bytes_compressed);
                data.duration_ms = Some(report.duration.as_millis());
                data.warnings.clone_from(&report.warnings);
            }
            Err(e) => data.error = Some(e.to_string()),
        }
        data
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_preview(&self, _discovery: &Discovery) {}

    fn format_listing(&self, discovery: &Discovery) -> Result<()> {
        Self::output(&JsonOutput::success("list", Self::list_data(discovery)))
    }

    fn format_no_addons(&self) -> Result<()> {
        let data = RunData {
            version: None,
            packs: Vec::new(),
            succeeded: 0,
            failed: 0,
        };
        Self::output(&JsonOutput::success("pack", data))
    }

    fn format_packing_started(&self, _pack_count: usize) {}

    fn format_pack_outcome(&self, _outcome: &PackOutcome) {}

    fn format_run_report(&self, version: &VersionTag, report: &RunReport) -> Result<()> {
        let data = RunData {
            version: Some(version.to_string()),
            packs: report.outcomes.iter().map(Self::pack_data).collect(),
            succeeded: report.succeeded(),
            failed: report.failed(),
        };
        let status = if report.has_failures() {
            Status::Partial
        } else {
            Status::Success
        };
        Self::output(&JsonOutput::with_status("pack", status, data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        Self::diagnostic(&JsonOutput::<()>::error("pack", format!("{error:#}")));
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            "message",
            SuccessData {
                message: message.to_string(),
            },
        );
        Self::diagnostic(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        Self::diagnostic(&output);
    }
}

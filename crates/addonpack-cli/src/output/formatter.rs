//! Output formatter trait for CLI results.

use addonpack_core::Discovery;
use addonpack_core::PackOutcome;
use addonpack_core::RunReport;
use addonpack_core::VersionTag;
use anyhow::Result;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the discovery preview shown before the version prompt
    fn format_preview(&self, discovery: &Discovery);

    /// Format a discovery listing (the `list` command)
    fn format_listing(&self, discovery: &Discovery) -> Result<()>;

    /// Format the report for a root with nothing in it
    fn format_no_addons(&self) -> Result<()>;

    /// Announce that packing is about to begin
    fn format_packing_started(&self, pack_count: usize);

    /// Format the result of a single pack as soon as it finishes
    fn format_pack_outcome(&self, outcome: &PackOutcome);

    /// Format the summary of a completed run
    fn format_run_report(&self, version: &VersionTag, report: &RunReport) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format success message
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Partial,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self::with_status(operation, Status::Success, data)
    }

    pub fn with_status(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

//! Error conversion utilities for CLI.
//!
//! Converts addonpack-core's typed errors (thiserror) into user-facing
//! errors (anyhow) with actionable guidance.

use addonpack_core::PackError;
use anyhow::anyhow;
use std::path::Path;

/// Message printed when the operator aborts the run.
pub const INTERRUPTED_MESSAGE: &str = "Program interrupted by user.";

/// Returns `true` if `err` is an operator interrupt.
pub fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<PackError>(), Some(PackError::Interrupted))
}

/// Converts `PackError` to a user-facing anyhow error with context.
pub fn convert_pack_error(err: PackError, root: &Path) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Directory not found: {}\n\
                 HINT: Run from the folder containing your add-ons or pass it as ROOT.",
                path.display()
            )
        }
        PackError::PathOutsideRoot { path, root } => {
            anyhow!(
                "Refusing to pack '{}': it is not inside '{}'\n\
                 HINT: A directory may have changed during the run. Nothing after this pack was written.",
                path.display(),
                root.display()
            )
        }
        PackError::ArchiveWrite { pack, source } => {
            anyhow!(
                "Failed to write {pack}: {source}\n\
                 HINT: Check that the output directory is writable and {pack} is not open elsewhere."
            )
        }
        PackError::InvalidVersion { input, reason } => {
            anyhow!(
                "Invalid version '{input}': {reason}\n\
                 HINT: Use three dot-separated numbers of at most 10 characters, e.g. 1.20.4"
            )
        }
        PackError::InvalidCompressionLevel { level } => {
            anyhow!("Invalid compression level {level}\nHINT: Use a level between 1 and 9.")
        }
        PackError::Io(io_err) => {
            anyhow!("I/O error while packing '{}': {}", root.display(), io_err)
        }
        // Kept typed so the process can exit with the interrupt status.
        PackError::Interrupted => anyhow::Error::new(PackError::Interrupted),
    }
}

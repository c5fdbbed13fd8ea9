//! Error types for add-on packing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while discovering, collecting or packing add-ons.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory to scan or collect does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A collected file is not located under the root it is archived from.
    #[error("path {path} is not under root directory: {root}")]
    PathOutsideRoot {
        /// The offending file path.
        path: PathBuf,
        /// The root the path was expected to live under.
        root: PathBuf,
    },

    /// Writing a pack archive failed.
    #[error("failed to write pack {pack}: {source}")]
    ArchiveWrite {
        /// File name of the pack being written.
        pack: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Version tag does not match the required format.
    #[error("invalid version tag '{input}': {reason}")]
    InvalidVersion {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// Compression level outside the supported 1-9 range.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Input was closed or cancelled before a value was accepted.
    #[error("interrupted by user")]
    Interrupted,
}

impl PackError {
    /// Returns `true` if this error must abort the whole packing run.
    ///
    /// Archive write failures are isolated to a single pack; a path outside
    /// its root means the collected file set is broken and nothing after it
    /// can be trusted.
    ///
    /// # Examples
    ///
    /// ```
    /// use addonpack_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::PathOutsideRoot {
    ///     path: PathBuf::from("/elsewhere/file.png"),
    ///     root: PathBuf::from("/packs/Forest/16x"),
    /// };
    /// assert!(err.is_fatal());
    ///
    /// let err = PackError::ArchiveWrite {
    ///     pack: "Forest-16x-1.0.0.zip".to_string(),
    ///     source: std::io::Error::other("disk full"),
    /// };
    /// assert!(!err.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::PathOutsideRoot { .. } | Self::Interrupted)
    }

    /// Wraps an I/O error as an archive write failure for `pack`.
    pub(crate) fn archive_write(pack: impl Into<String>, source: std::io::Error) -> Self {
        Self::ArchiveWrite {
            pack: pack.into(),
            source,
        }
    }
}

//! Configuration for add-on discovery and packing.
//!
//! There is no configuration file; callers build a `PackerConfig` in code
//! (the CLI maps its flags onto it).

use crate::PackError;
use crate::Result;
use std::path::PathBuf;

/// Character that marks a node as hidden.
pub const HIDDEN_PREFIX: char = '.';

/// Extension of documentation files left out of packs.
pub const DOC_EXTENSION: &str = ".md";

/// Directory names excluded from pack content, compared case-insensitively.
pub const RESERVED_DIRS: [&str; 2] = ["images", "projects"];

/// Configuration for discovering and packing add-ons.
///
/// # Examples
///
/// ```
/// use addonpack_core::PackerConfig;
///
/// let config = PackerConfig::default().with_compression_level(9);
/// assert_eq!(config.compression_level, 9);
/// assert!(config.is_reserved_dir("Images"));
/// ```
#[derive(Debug, Clone)]
pub struct PackerConfig {
    /// Names starting with this character are skipped everywhere.
    ///
    /// Default: `'.'`.
    pub hidden_prefix: char,

    /// Files ending with this extension (case-insensitive) are not packed.
    ///
    /// Default: `".md"`.
    pub doc_extension: String,

    /// Directories with these names (case-insensitive) are skipped together
    /// with their whole subtree.
    ///
    /// Default: `["images", "projects"]`.
    pub reserved_dirs: Vec<String>,

    /// Deflate compression level (1-9).
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Directory packs are written to. `None` writes next to the add-ons,
    /// in the working root.
    ///
    /// Default: `None`.
    pub output_dir: Option<PathBuf>,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            hidden_prefix: HIDDEN_PREFIX,
            doc_extension: DOC_EXTENSION.to_string(),
            reserved_dirs: RESERVED_DIRS.iter().map(|s| (*s).to_string()).collect(),
            compression_level: 6,
            output_dir: None,
        }
    }
}

impl PackerConfig {
    /// Creates a new `PackerConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are caught by [`PackerConfig::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets the output directory for packs.
    #[must_use]
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Sets the reserved directory names.
    #[must_use]
    pub fn with_reserved_dirs(mut self, dirs: Vec<String>) -> Self {
        self.reserved_dirs = dirs;
        self
    }

    /// Returns `true` if `name` starts with the hidden prefix.
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with(self.hidden_prefix)
    }

    /// Returns `true` if `name` ends with the documentation extension,
    /// ignoring case.
    #[must_use]
    pub fn is_documentation(&self, name: &str) -> bool {
        name.to_lowercase()
            .ends_with(&self.doc_extension.to_lowercase())
    }

    /// Returns `true` if `name` equals one of the reserved directory names,
    /// ignoring case.
    #[must_use]
    pub fn is_reserved_dir(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.reserved_dirs
            .iter()
            .any(|reserved| reserved.to_lowercase() == lower)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.compression_level) {
            return Err(PackError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }
        Ok(())
    }
}

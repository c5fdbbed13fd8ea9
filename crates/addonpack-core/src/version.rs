//! Version tag validation.

use crate::PackError;
use crate::Result;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Longest accepted version tag, in characters.
pub const MAX_VERSION_LEN: usize = 10;

#[allow(clippy::expect_used)] // literal pattern
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid version regex"));

/// A validated `MAJOR.MINOR.PATCH` version tag, at most 10 characters long.
///
/// # Examples
///
/// ```
/// use addonpack_core::VersionTag;
///
/// assert!(VersionTag::parse("1.2.3").is_ok());
/// assert!(VersionTag::parse("1.2").is_err());
/// assert!(VersionTag::parse("v1.2.3").is_err());
/// assert!(VersionTag::parse("10.200.3000").is_err()); // 11 characters
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    /// Validates `input` as a version tag.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidVersion` if `input` is longer than
    /// [`MAX_VERSION_LEN`] or is not three dot-separated numbers.
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().count() > MAX_VERSION_LEN {
            return Err(PackError::InvalidVersion {
                input: input.to_string(),
                reason: format!("longer than {MAX_VERSION_LEN} characters"),
            });
        }

        if !VERSION_PATTERN.is_match(input) {
            return Err(PackError::InvalidVersion {
                input: input.to_string(),
                reason: "expected MAJOR.MINOR.PATCH, e.g. 1.20.4".to_string(),
            });
        }

        Ok(Self(input.to_string()))
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VersionTag {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

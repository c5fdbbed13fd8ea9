//! Discovery, filtering and ZIP packaging of add-on resource packs.
//!
//! `addonpack-core` scans a working root laid out as
//! `root/<add-on>/<resolution>/...`, filters each resolution's content and
//! writes one deflate-compressed pack per (add-on, resolution) pair, named
//! `{addon}-{resolution}-{version}.zip`.
//!
//! Hidden entries (names starting with `.`), documentation files (`*.md`)
//! and the reserved `images`/`projects` directories never end up in a pack.
//!
//! # Examples
//!
//! ```no_run
//! use addonpack_core::NoopObserver;
//! use addonpack_core::Packer;
//! use addonpack_core::PackerConfig;
//! use addonpack_core::VersionTag;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let packer = Packer::new("/path/to/addons", PackerConfig::default())?;
//! let discovery = packer.discover();
//! let version = VersionTag::parse("1.20.4")?;
//! let report = packer.pack_all(&discovery, &version, &mut NoopObserver)?;
//! println!("Wrote {} packs", report.succeeded());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod collector;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filters;
pub mod packer;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod version;

// Re-export main API types
pub use config::PackerConfig;
pub use discovery::Addon;
pub use discovery::Discovery;
pub use discovery::PackTarget;
pub use discovery::Resolution;
pub use error::PackError;
pub use error::Result;
pub use packer::NoopObserver;
pub use packer::PackObserver;
pub use packer::PackOutcome;
pub use packer::Packer;
pub use packer::RunReport;
pub use prompt::PromptIo;
pub use prompt::VersionPrompt;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use version::VersionTag;

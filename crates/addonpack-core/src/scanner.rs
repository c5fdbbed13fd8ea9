//! Single-level directory listing.
//!
//! Used to find add-ons under the working root, resolutions under an add-on,
//! and to build the preview shown before packing. Never recurses.

use crate::config::PackerConfig;
use crate::filters;
use crate::filters::Node;
use crate::filters::NodeKind;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing::warn;

/// Which filter a listing applies to the children of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Non-hidden directories only.
    Discovery,

    /// Packable files and non-reserved directories, for display.
    Preview,
}

/// Lists the names of the direct children of `dir` that pass `mode`.
///
/// Names are sorted. Symlinks count as whatever they point to. An empty or
/// missing directory yields an empty list; entries that cannot be read, and
/// dangling links, are skipped with a warning.
///
/// # Examples
///
/// ```no_run
/// use addonpack_core::PackerConfig;
/// use addonpack_core::scanner::{ListMode, list_children};
/// use std::path::Path;
///
/// let config = PackerConfig::default();
/// for addon in list_children(Path::new("."), ListMode::Discovery, &config) {
///     println!("Add-on found: {addon}");
/// }
/// ```
#[must_use]
pub fn list_children(dir: &Path, mode: ListMode, config: &PackerConfig) -> Vec<String> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "directory not readable, listing nothing");
        return Vec::new();
    };

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // Follows symlinks, so a linked directory lists as a directory.
        let kind = match fs::metadata(entry.path()) {
            Ok(metadata) => NodeKind::from_file_type(metadata.file_type()),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "skipping unresolvable entry");
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 name");
            continue;
        };

        let node = Node::new(name, kind);
        let included = match mode {
            ListMode::Discovery => filters::include_in_discovery(&node, config),
            ListMode::Preview => filters::include_in_content(&node, config),
        };

        if included {
            names.push(name.to_string());
        }
    }

    names.sort();
    names
}

/// Returns `true` if `dir` has at least one entry of any kind.
///
/// Hidden entries count. A missing directory has no entries.
#[must_use]
pub fn has_any_entries(dir: &Path) -> bool {
    fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

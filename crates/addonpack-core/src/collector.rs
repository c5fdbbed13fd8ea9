//! Recursive collection of the files that go into a pack.
//!
//! Walks a resolution directory depth-first, pruning hidden and reserved
//! directories with their whole subtree and keeping packable files.

use crate::PackError;
use crate::Result;
use crate::config::PackerConfig;
use crate::filters;
use crate::filters::Node;
use crate::filters::NodeKind;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Collects every packable file below `root`.
///
/// Directories are visited in file-name order, so two runs over an unchanged
/// tree return the same list. Symlinks are followed and collected under the
/// link's own path; dangling links are skipped with a warning. An empty result
/// is not an error.
///
/// # Examples
///
/// ```no_run
/// use addonpack_core::PackerConfig;
/// use addonpack_core::collector::collect;
/// use std::path::Path;
///
/// let config = PackerConfig::default();
/// let files = collect(Path::new("Forest/16x"), &config)?;
/// println!("{} files to pack", files.len());
/// # Ok::<(), addonpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `root` does not exist or is not a directory
/// - A directory below `root` cannot be read
/// - A symlink loops back to one of its ancestors
pub fn collect(root: &Path, config: &PackerConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(PackError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        // The root itself is never filtered, whatever its name.
        .filter_entry(|entry| entry.depth() == 0 || is_content(entry, config));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_dangling_link(&e) => {
                warn!(error = %e, "skipping dangling symlink");
                continue;
            }
            Err(e) => {
                return Err(PackError::Io(std::io::Error::other(format!(
                    "walkdir error: {e}"
                ))));
            }
        };

        if entry.depth() > 0 && entry.file_type().is_file() {
            debug!(path = %entry.path().display(), "collected");
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_dangling_link(error: &walkdir::Error) -> bool {
    error.loop_ancestor().is_none()
        && error.path().is_some_and(|path| {
            path.symlink_metadata()
                .is_ok_and(|m| m.file_type().is_symlink())
                && fs::metadata(path).is_err()
        })
}

fn is_content(entry: &DirEntry, config: &PackerConfig) -> bool {
    let kind = NodeKind::from_file_type(entry.file_type());
    match Node::from_path(entry.path(), kind) {
        Some(node) => filters::include_in_content(&node, config),
        None => {
            warn!(path = %entry.path().display(), "skipping entry without a UTF-8 name");
            false
        }
    }
}

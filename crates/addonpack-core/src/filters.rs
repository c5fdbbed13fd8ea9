//! Node filtering rules for discovery and pack content.
//!
//! Two traversal modes share one set of name rules:
//!
//! - **Discovery** lists add-on and resolution directories.
//! - **Content** decides what ends up inside a pack.
//!
//! Hidden nodes are excluded from both modes at every depth.

use crate::config::PackerConfig;
use std::fs::FileType;
use std::path::Path;

/// Kind of a filesystem node as far as filtering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Socket, device, dangling link or anything else. Never included.
    Other,
}

impl NodeKind {
    /// Classifies a `FileType`.
    ///
    /// Pass the type from `fs::metadata` to classify a symlink by its target.
    #[must_use]
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Name and kind of a single filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    /// File name of the entry (last path component).
    pub name: &'a str,

    /// What kind of entry this is.
    pub kind: NodeKind,
}

impl<'a> Node<'a> {
    /// Creates a node from a name and kind.
    #[must_use]
    pub const fn new(name: &'a str, kind: NodeKind) -> Self {
        Self { name, kind }
    }

    /// Creates a node from a path's last component.
    ///
    /// Returns `None` when the path has no file name or the name is not
    /// valid UTF-8; such entries cannot be named in a pack and are skipped.
    #[must_use]
    pub fn from_path(path: &'a Path, kind: NodeKind) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Some(Self::new(name, kind))
    }
}

/// Checks if a node is listed when discovering add-ons and resolutions.
///
/// Only non-hidden directories pass.
///
/// # Examples
///
/// ```
/// use addonpack_core::PackerConfig;
/// use addonpack_core::filters::{self, Node, NodeKind};
///
/// let config = PackerConfig::default();
/// assert!(filters::include_in_discovery(&Node::new("Forest", NodeKind::Directory), &config));
/// assert!(!filters::include_in_discovery(&Node::new(".git", NodeKind::Directory), &config));
/// assert!(!filters::include_in_discovery(&Node::new("pack.png", NodeKind::File), &config));
/// ```
#[must_use]
pub fn include_in_discovery(node: &Node<'_>, config: &PackerConfig) -> bool {
    !config.is_hidden(node.name) && node.kind == NodeKind::Directory
}

/// Checks if a node belongs to pack content.
///
/// For files this means "is packed"; for directories it means "is descended
/// into". Documentation files and reserved directories are excluded, hidden
/// nodes always are.
///
/// # Examples
///
/// ```
/// use addonpack_core::PackerConfig;
/// use addonpack_core::filters::{self, Node, NodeKind};
///
/// let config = PackerConfig::default();
/// assert!(filters::include_in_content(&Node::new("pack.png", NodeKind::File), &config));
/// assert!(!filters::include_in_content(&Node::new("README.MD", NodeKind::File), &config));
/// assert!(!filters::include_in_content(&Node::new("Images", NodeKind::Directory), &config));
/// assert!(filters::include_in_content(&Node::new("textures", NodeKind::Directory), &config));
/// ```
#[must_use]
pub fn include_in_content(node: &Node<'_>, config: &PackerConfig) -> bool {
    if config.is_hidden(node.name) {
        return false;
    }

    match node.kind {
        NodeKind::File => !config.is_documentation(node.name),
        NodeKind::Directory => !config.is_reserved_dir(node.name),
        NodeKind::Other => false,
    }
}

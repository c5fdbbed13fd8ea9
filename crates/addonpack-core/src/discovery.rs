//! Add-on and resolution discovery under a working root.

use crate::config::PackerConfig;
use crate::scanner;
use crate::scanner::ListMode;
use crate::version::VersionTag;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// A variant directory inside an add-on, e.g. a texture resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Directory name.
    pub name: String,

    /// Full path of the resolution directory.
    pub path: PathBuf,

    /// Direct children shown before packing, in preview mode.
    pub preview: Vec<String>,
}

/// A top-level content package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    /// Directory name.
    pub name: String,

    /// Full path of the add-on directory.
    pub path: PathBuf,

    /// Resolutions found inside the add-on, sorted by name.
    pub resolutions: Vec<Resolution>,
}

/// Everything found under a working root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// The working root that was scanned.
    pub root: PathBuf,

    /// Add-ons found under the root, sorted by name.
    pub addons: Vec<Addon>,

    /// `true` if the root had no entries at all, hidden ones included.
    pub empty_root: bool,
}

impl Discovery {
    /// Scans `root` for add-ons and their resolutions.
    ///
    /// Never fails: a missing or unreadable root is reported as empty.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use addonpack_core::PackerConfig;
    /// use addonpack_core::discovery::Discovery;
    /// use std::path::Path;
    ///
    /// let discovery = Discovery::scan(Path::new("."), &PackerConfig::default());
    /// for addon in &discovery.addons {
    ///     println!("Add-on found: {}", addon.name);
    /// }
    /// ```
    #[must_use]
    pub fn scan(root: &Path, config: &PackerConfig) -> Self {
        if !scanner::has_any_entries(root) {
            return Self {
                root: root.to_path_buf(),
                addons: Vec::new(),
                empty_root: true,
            };
        }

        let addons = scanner::list_children(root, ListMode::Discovery, config)
            .into_iter()
            .map(|name| {
                let path = root.join(&name);
                let resolutions = scanner::list_children(&path, ListMode::Discovery, config)
                    .into_iter()
                    .map(|res_name| {
                        let res_path = path.join(&res_name);
                        let preview = scanner::list_children(&res_path, ListMode::Preview, config);
                        debug!(addon = %name, resolution = %res_name, "resolution found");
                        Resolution {
                            name: res_name,
                            path: res_path,
                            preview,
                        }
                    })
                    .collect();
                Addon {
                    name,
                    path,
                    resolutions,
                }
            })
            .collect();

        Self {
            root: root.to_path_buf(),
            addons,
            empty_root: false,
        }
    }

    /// Returns `true` if the root had no entries at all.
    #[must_use]
    pub fn is_empty_root(&self) -> bool {
        self.empty_root
    }

    /// Number of (add-on, resolution) pairs, i.e. packs a run produces.
    #[must_use]
    pub fn pack_count(&self) -> usize {
        self.addons.iter().map(|a| a.resolutions.len()).sum()
    }

    /// Builds one target per (add-on, resolution) pair for `version`.
    ///
    /// Packs are written to `output_dir`.
    #[must_use]
    pub fn targets(&self, version: &VersionTag, output_dir: &Path) -> Vec<PackTarget> {
        self.addons
            .iter()
            .flat_map(|addon| {
                addon.resolutions.iter().map(move |resolution| {
                    let name = pack_name(&addon.name, &resolution.name, version);
                    PackTarget {
                        addon: addon.name.clone(),
                        resolution: resolution.name.clone(),
                        source: resolution.path.clone(),
                        output: output_dir.join(&name),
                        name,
                    }
                })
            })
            .collect()
    }
}

/// One pack to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackTarget {
    /// Add-on name.
    pub addon: String,

    /// Resolution name.
    pub resolution: String,

    /// Resolution directory whose content is packed.
    pub source: PathBuf,

    /// Pack file name, `{addon}-{resolution}-{version}.zip`.
    pub name: String,

    /// Full output path of the pack.
    pub output: PathBuf,
}

/// Derives the pack file name for an add-on, resolution and version.
///
/// # Examples
///
/// ```
/// use addonpack_core::VersionTag;
/// use addonpack_core::discovery::pack_name;
///
/// let version = VersionTag::parse("1.0.0")?;
/// assert_eq!(pack_name("Forest", "16x", &version), "Forest-16x-1.0.0.zip");
/// # Ok::<(), addonpack_core::PackError>(())
/// ```
#[must_use]
pub fn pack_name(addon: &str, resolution: &str, version: &VersionTag) -> String {
    format!("{addon}-{resolution}-{version}.zip")
}

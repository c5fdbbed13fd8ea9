//! Packing run orchestration.
//!
//! A run discovers add-ons under an explicit working root, then builds one
//! pack per (add-on, resolution) pair. Each pack's file set is collected
//! fresh right before it is written. A failing pack is recorded and the run
//! moves on; only fatal errors stop it.

use crate::Result;
use crate::builder;
use crate::collector;
use crate::config::PackerConfig;
use crate::discovery::Discovery;
use crate::discovery::PackTarget;
use crate::report::NoopProgress;
use crate::report::PackReport;
use crate::report::ProgressCallback;
use crate::version::VersionTag;
use std::path::Path;
use std::path::PathBuf;
use tracing::error;
use tracing::info;

/// Receives per-pack events during [`Packer::pack_all`].
pub trait PackObserver {
    /// Called once a pack's files are collected, before the archive is
    /// written. Returns the progress callback for this pack.
    fn on_pack_start(&mut self, _target: &PackTarget, _files: usize) -> Box<dyn ProgressCallback> {
        Box::new(NoopProgress)
    }

    /// Called after a pack succeeded or failed.
    fn on_pack_finished(&mut self, _outcome: &PackOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PackObserver for NoopObserver {}

/// Result of building a single pack.
#[derive(Debug)]
pub struct PackOutcome {
    /// The pack that was attempted.
    pub target: PackTarget,

    /// Report on success, the recoverable error otherwise.
    pub result: Result<PackReport>,
}

impl PackOutcome {
    /// Returns `true` if the pack was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole packing run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One outcome per (add-on, resolution) pair, in discovery order.
    pub outcomes: Vec<PackOutcome>,
}

impl RunReport {
    /// Number of packs written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of packs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Returns `true` if any pack failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Discovers and packs the add-ons under a working root.
///
/// # Examples
///
/// ```no_run
/// use addonpack_core::NoopObserver;
/// use addonpack_core::Packer;
/// use addonpack_core::PackerConfig;
/// use addonpack_core::VersionTag;
///
/// let packer = Packer::new("./addons", PackerConfig::default())?;
/// let discovery = packer.discover();
/// if discovery.is_empty_root() {
///     println!("No add-ons found!");
///     return Ok(());
/// }
///
/// let version = VersionTag::parse("1.20.4")?;
/// let report = packer.pack_all(&discovery, &version, &mut NoopObserver)?;
/// println!("{} packs written", report.succeeded());
/// # Ok::<(), addonpack_core::PackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Packer {
    root: PathBuf,
    config: PackerConfig,
}

impl Packer {
    /// Creates a packer for the working root `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(root: impl Into<PathBuf>, config: PackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: root.into(),
            config,
        })
    }

    /// The working root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The packer configuration.
    #[must_use]
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Directory packs are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.config.output_dir.as_deref().unwrap_or(&self.root)
    }

    /// Scans the working root for add-ons and resolutions.
    #[must_use]
    pub fn discover(&self) -> Discovery {
        Discovery::scan(&self.root, &self.config)
    }

    /// Collects and writes a single pack.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution cannot be walked or the archive
    /// cannot be written.
    pub fn pack_one(
        &self,
        target: &PackTarget,
        observer: &mut dyn PackObserver,
    ) -> Result<PackReport> {
        let files = collector::collect(&target.source, &self.config)?;
        let mut progress = observer.on_pack_start(target, files.len());
        builder::build_pack(
            &target.source,
            &files,
            &target.output,
            &self.config,
            progress.as_mut(),
        )
    }

    /// Builds every pack in `discovery` for `version`.
    ///
    /// Recoverable failures are recorded in the returned report and the run
    /// continues with the next pack.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error (see [`crate::PackError::is_fatal`]); packs
    /// written before it stay on disk.
    pub fn pack_all(
        &self,
        discovery: &Discovery,
        version: &VersionTag,
        observer: &mut dyn PackObserver,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();

        for target in discovery.targets(version, self.output_dir()) {
            let result = match self.pack_one(&target, observer) {
                Err(e) if e.is_fatal() => {
                    error!(pack = %target.name, error = %e, "aborting run");
                    return Err(e);
                }
                other => other,
            };

            match &result {
                Ok(_) => info!(pack = %target.name, "packed"),
                Err(e) => error!(pack = %target.name, error = %e, "pack failed"),
            }

            let outcome = PackOutcome { target, result };
            observer.on_pack_finished(&outcome);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<(String, usize)>,
        finished: Vec<(String, bool)>,
    }

    impl PackObserver for Recorder {
        fn on_pack_start(&mut self, target: &PackTarget, files: usize) -> Box<dyn ProgressCallback> {
            self.started.push((target.name.clone(), files));
            Box::new(NoopProgress)
        }

        fn on_pack_finished(&mut self, outcome: &PackOutcome) {
            self.finished
                .push((outcome.target.name.clone(), outcome.is_success()));
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PackerConfig::default().with_compression_level(0);
        assert!(Packer::new("/tmp", config).is_err());
    }

    #[test]
    fn test_output_dir_defaults_to_root() {
        let packer = Packer::new("/packs", PackerConfig::default()).unwrap();
        assert_eq!(packer.output_dir(), Path::new("/packs"));

        let config = PackerConfig::default().with_output_dir(Some(PathBuf::from("/out")));
        let packer = Packer::new("/packs", config).unwrap();
        assert_eq!(packer.output_dir(), Path::new("/out"));
    }

    #[test]
    fn test_pack_all_notifies_observer() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Forest/16x/pack.png");
        write(temp.path(), "Forest/16x/README.md");
        write(temp.path(), "Forest/32x/pack.png");
        write(temp.path(), "Forest/32x/a/b.png");

        let packer = Packer::new(temp.path(), PackerConfig::default()).unwrap();
        let discovery = packer.discover();
        let version = VersionTag::parse("1.0.0").unwrap();
        let mut recorder = Recorder::default();

        let report = packer.pack_all(&discovery, &version, &mut recorder).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert!(!report.has_failures());
        assert_eq!(
            recorder.started,
            vec![
                ("Forest-16x-1.0.0.zip".to_string(), 1),
                ("Forest-32x-1.0.0.zip".to_string(), 2),
            ]
        );
        assert_eq!(recorder.finished.len(), 2);
        assert!(temp.path().join("Forest-32x-1.0.0.zip").exists());
    }

    #[test]
    fn test_pack_all_continues_after_write_failure() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "A/16x/a.png");
        write(temp.path(), "B/16x/b.png");
        // A directory squatting on the first pack's output path.
        fs::create_dir_all(temp.path().join("A-16x-1.0.0.zip")).unwrap();

        let packer = Packer::new(temp.path(), PackerConfig::default()).unwrap();
        let discovery = packer.discover();
        let version = VersionTag::parse("1.0.0").unwrap();

        let report = packer.pack_all(&discovery, &version, &mut NoopObserver).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        let failed: Vec<_> = report
            .outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.target.name.as_str())
            .collect();
        assert_eq!(failed, vec!["A-16x-1.0.0.zip"]);
        assert!(temp.path().join("B-16x-1.0.0.zip").is_file());
    }

    #[test]
    fn test_pack_all_writes_to_output_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("addons");
        let out = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        write(&root, "Forest/16x/pack.png");

        let config = PackerConfig::default().with_output_dir(Some(out.clone()));
        let packer = Packer::new(&root, config).unwrap();
        let discovery = packer.discover();
        let version = VersionTag::parse("2.0.0").unwrap();

        packer.pack_all(&discovery, &version, &mut NoopObserver).unwrap();

        assert!(out.join("Forest-16x-2.0.0.zip").is_file());
        assert!(!root.join("Forest-16x-2.0.0.zip").exists());
    }
}

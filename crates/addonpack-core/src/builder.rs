//! ZIP pack assembly.
//!
//! Writes one deflate-compressed archive from a collected file list, naming
//! each entry by its path relative to the resolution root.

use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::config::PackerConfig;
use crate::report::PackReport;
use chrono::Datelike;
use chrono::Local;
use chrono::Timelike;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds the pack at `output` from `files`, all of which live under `root`.
///
/// An existing file at `output` is overwritten. Entry names are relative to
/// `root` and always use `/` separators. The archive is finished and synced
/// to disk before returning; on failure the partial archive is removed.
///
/// # Examples
///
/// ```no_run
/// use addonpack_core::NoopProgress;
/// use addonpack_core::PackerConfig;
/// use addonpack_core::builder::build_pack;
/// use addonpack_core::collector::collect;
/// use std::path::Path;
///
/// let config = PackerConfig::default();
/// let root = Path::new("Forest/16x");
/// let files = collect(root, &config)?;
/// let report = build_pack(root, &files, Path::new("Forest-16x-1.0.0.zip"), &config, &mut NoopProgress)?;
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), addonpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - A file is not under `root` (`PackError::PathOutsideRoot`); nothing is
///   written in that case
/// - The archive cannot be created, written or synced
///   (`PackError::ArchiveWrite`)
pub fn build_pack<P: AsRef<Path>>(
    root: &Path,
    files: &[P],
    output: &Path,
    config: &PackerConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    // Resolve every entry name up front so a bad file list never leaves a
    // half-written archive behind.
    let entries = files
        .iter()
        .map(|file| {
            let file = file.as_ref();
            archive_name(file, root).map(|name| (file.to_path_buf(), name))
        })
        .collect::<Result<Vec<_>>>()?;

    let pack = output
        .file_name()
        .map_or_else(|| output.display().to_string(), |n| n.to_string_lossy().into_owned());

    let start = std::time::Instant::now();
    let mut report = PackReport::new();
    report.output = output.to_path_buf();

    let result = File::create(output).and_then(|file| {
        let file = write_entries(file, &entries, config, &mut report, progress)?;
        file.sync_all()?;
        file.metadata()
    });

    match result {
        Ok(metadata) => {
            report.bytes_compressed = metadata.len();
            report.duration = start.elapsed();
            progress.on_complete();
            info!(
                pack = %pack,
                files = report.files_added,
                bytes = report.bytes_written,
                "pack written"
            );
            Ok(report)
        }
        Err(e) => {
            if output.is_file()
                && let Err(cleanup) = fs::remove_file(output)
            {
                warn!(pack = %pack, error = %cleanup, "failed to remove partial pack");
            }
            Err(PackError::archive_write(pack, e))
        }
    }
}

/// Streams every entry into a ZIP on `writer` and returns the finished writer.
fn write_entries<W: Write + Seek>(
    writer: W,
    entries: &[(PathBuf, String)],
    config: &PackerConfig,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> std::io::Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(config.compression_level)));

    let total = entries.len();
    let mut buffer = vec![0u8; 64 * 1024]; // 64 KB

    for (idx, (path, name)) in entries.iter().enumerate() {
        let entry_path = Path::new(name);
        progress.on_entry_start(entry_path, total, idx + 1);

        let mut file = File::open(path)?;
        let metadata = file.metadata()?;
        let (timestamp, clamped) = metadata
            .modified()
            .map_or((zip::DateTime::default(), true), zip_timestamp);
        if clamped {
            report.add_warning(format!("Timestamp of {name} out of ZIP range, clamped"));
        }

        zip.start_file(name.as_str(), options.last_modified_time(timestamp))
            .map_err(std::io::Error::other)?;

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            zip.write_all(&buffer[..bytes_read])?;
            report.bytes_written += bytes_read as u64;
            progress.on_bytes_written(bytes_read as u64);
        }

        report.files_added += 1;
        debug!(entry = %name, "added to pack");
        progress.on_entry_complete(entry_path);
    }

    zip.finish().map_err(std::io::Error::other)
}

/// Computes the entry name of `file` inside a pack rooted at `root`.
///
/// The root prefix is stripped exactly and the remaining components are
/// joined with `/`, whatever the host separator is.
///
/// # Examples
///
/// ```
/// use addonpack_core::builder::archive_name;
/// use std::path::Path;
///
/// let root = Path::new("packs").join("Forest").join("16x");
/// let file = root.join("assets").join("stone.png");
/// assert_eq!(archive_name(&file, &root)?, "assets/stone.png");
/// # Ok::<(), addonpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns `PackError::PathOutsideRoot` if `file` is not strictly below
/// `root`, contains `..`, or is not valid UTF-8.
pub fn archive_name(file: &Path, root: &Path) -> Result<String> {
    let outside = || PackError::PathOutsideRoot {
        path: file.to_path_buf(),
        root: root.to_path_buf(),
    };

    let relative = file.strip_prefix(root).map_err(|_| outside())?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(outside)?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(outside());
            }
        }
    }

    if parts.is_empty() {
        return Err(outside());
    }

    Ok(parts.join("/"))
}

/// Converts a modification time to a ZIP timestamp in local time.
///
/// ZIP can store 1980-01-01 through 2107-12-31. Earlier times are clamped to
/// the start of that range and later ones to its end; the flag reports
/// whether clamping happened.
#[must_use]
pub fn zip_timestamp(mtime: SystemTime) -> (zip::DateTime, bool) {
    let secs = match mtime.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).ok(),
        Err(e) => i64::try_from(e.duration().as_secs()).ok().map(|s| -s),
    };
    let Some(local) = secs
        .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|utc| utc.with_timezone(&Local))
    else {
        return (zip::DateTime::default(), true);
    };

    if local.year() < 1980 {
        return (zip::DateTime::default(), true);
    }
    if local.year() > 2107 {
        return (latest_zip_timestamp(), true);
    }

    let converted = (
        u16::try_from(local.year()),
        u8::try_from(local.month()),
        u8::try_from(local.day()),
        u8::try_from(local.hour()),
        u8::try_from(local.minute()),
        u8::try_from(local.second()),
    );
    match converted {
        (Ok(y), Ok(mo), Ok(d), Ok(h), Ok(mi), Ok(s)) => {
            zip::DateTime::from_date_and_time(y, mo, d, h, mi, s)
                .map_or((zip::DateTime::default(), true), |dt| (dt, false))
        }
        _ => (zip::DateTime::default(), true),
    }
}

fn latest_zip_timestamp() -> zip::DateTime {
    zip::DateTime::from_date_and_time(2107, 12, 31, 23, 59, 58).unwrap_or_default()
}

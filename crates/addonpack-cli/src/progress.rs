//! Progress bar shown while a pack is written.

use addonpack_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// Per-pack progress bar implementing `ProgressCallback`.
///
/// Counts files added to the archive and shows the uncompressed bytes read so
/// far. The bar is cleared when the pack completes or the value is dropped.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a bar for a pack of `total` files labelled `pack`.
    #[must_use]
    pub fn new(total: usize, pack: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        // "Forest-16x-1.0.0.zip [████████░░░░] 42/100 files 15.2 MB"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(pack.to_string());

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Whether a progress bar can be drawn (stderr is a terminal).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_message(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(1023), "1023 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(humanize_bytes(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_progress_tracks_files_and_bytes() {
        let mut progress = CliProgress::new(2, "Forest-16x-1.0.0.zip");

        progress.on_entry_start(Path::new("pack.png"), 2, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("pack.png"));
        progress.on_entry_start(Path::new("pack.mcmeta"), 2, 2);
        progress.on_bytes_written(512);
        progress.on_entry_complete(Path::new("pack.mcmeta"));

        assert_eq!(progress.bytes_written, 1536);
        assert_eq!(progress.bar.position(), 2);
        progress.on_complete();
        assert!(progress.bar.is_finished());
    }
}

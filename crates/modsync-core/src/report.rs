//! Update operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of the removal stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Folders that existed and were deleted, in folder-set order.
    pub removed: Vec<PathBuf>,

    /// Folders that were not present, in folder-set order.
    pub not_found: Vec<PathBuf>,
}

/// Outcome of the extraction stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total decompressed bytes written to disk.
    pub bytes_written: u64,

    /// Entries outside the configured folders.
    pub entries_skipped: usize,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of qualifying entries restored.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Report of a full update: removal, then extraction.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    /// Removal stage results.
    pub removal: RemovalReport,

    /// Extraction stage results.
    pub extraction: ExtractionReport,

    /// Wall-clock time of the whole operation.
    pub duration: Duration,
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use modsync_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before a qualifying entry is written.
    ///
    /// `total` is the number of entries in the archive and `current` is the
    /// 1-based position of this entry.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after file content has been copied.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once a qualifying entry is fully on disk.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when extraction finishes successfully.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

//! High-level entry point: validate, remove, then restore.

use std::path::Path;
use std::time::Instant;

use crate::Result;
use crate::SyncConfig;
use crate::UpdateReport;
use crate::extract::extract_configured_folders_with_progress;
use crate::remove::remove_configured_folders;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::validate::validate;

/// Replaces the configured folders in `destination` with their copies in
/// `archive`.
///
/// Runs the three stages in order and stops at the first failure:
///
/// 1. [`validate`] both paths (nothing is touched on failure);
/// 2. remove every configured folder present in `destination`;
/// 3. extract the qualifying entries of `archive` into `destination`.
///
/// A failure in stage 2 or 3 can leave the destination with folders removed
/// but not restored, or partially restored. Re-running with a good archive
/// repairs it; see [`crate::UpdateError::destination_modified`].
///
/// # Errors
///
/// Returns an [`crate::UpdateError`] tagged with the failing stage.
///
/// # Examples
///
/// ```no_run
/// use modsync_core::SyncConfig;
/// use modsync_core::update_folders;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = update_folders("/srv/minecraft", "/backups/pack.zip", &SyncConfig::default())?;
/// println!(
///     "removed {} folders, restored {} files",
///     report.removal.removed.len(),
///     report.extraction.files_extracted
/// );
/// # Ok(())
/// # }
/// ```
pub fn update_folders<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    archive: Q,
    config: &SyncConfig,
) -> Result<UpdateReport> {
    update_folders_with_progress(destination, archive, config, &mut NoopProgress)
}

/// Same as [`update_folders`], reporting extraction progress.
///
/// # Errors
///
/// See [`update_folders`].
pub fn update_folders_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    archive: Q,
    config: &SyncConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<UpdateReport> {
    let start = Instant::now();
    let destination = destination.as_ref();
    let archive = archive.as_ref();

    validate(destination, archive)?;

    let removal = remove_configured_folders(destination, &config.folders)?;
    let extraction = extract_configured_folders_with_progress(archive, destination, config, progress)?;

    let report = UpdateReport {
        removal,
        extraction,
        duration: start.elapsed(),
    };

    tracing::info!(
        destination = %destination.display(),
        elapsed_ms = report.duration.as_millis(),
        "update completed"
    );

    Ok(report)
}

//! Error conversion utilities for CLI.
//!
//! Converts modsync-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use modsync_core::ConfigError;
use modsync_core::ExtractionError;
use modsync_core::RemovalError;
use modsync_core::UpdateError;
use modsync_core::ValidationError;
use std::path::Path;

const PARTIAL_STATE_HINT: &str = "HINT: The destination may be partially restored. \
     Run the update again with a valid archive to repair it.";

/// Converts `UpdateError` to user-friendly anyhow error with context
pub fn convert_update_error(err: UpdateError, archive: &Path) -> anyhow::Error {
    match err {
        UpdateError::Validation(err) => convert_validation_error(err),
        UpdateError::Removal(RemovalError::RemovalFailed {
            folder,
            path,
            source,
        }) => {
            anyhow!(
                "Failed to remove folder '{}' at '{}': {}\n\
                 HINT: Check that no other program holds files open there and that you have \
                 write permission.\n\
                 {PARTIAL_STATE_HINT}",
                folder,
                path.display(),
                source
            )
        }
        UpdateError::Extraction(err) => {
            let converted = convert_extraction_error(err, archive);
            anyhow!("{converted:?}\n{PARTIAL_STATE_HINT}")
        }
    }
}

fn convert_validation_error(err: ValidationError) -> anyhow::Error {
    match err {
        ValidationError::DestinationNotFound { path } => {
            anyhow!(
                "Destination directory does not exist: '{}'\n\
                 HINT: Pass the game directory that contains the folders to restore.",
                path.display()
            )
        }
        ValidationError::ArchiveUnreadable { path, source } => {
            anyhow!(
                "ZIP file does not exist or is not readable: '{}' ({})\n\
                 HINT: Check the archive path and its permissions.",
                path.display(),
                source
            )
        }
        ValidationError::EmptyDestination | ValidationError::EmptyArchivePath => {
            anyhow::Error::from(err)
        }
    }
}

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::ArchiveOpenFailed { source, .. } => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The file may be corrupted or may not be a ZIP archive.",
                archive.display(),
                source
            )
        }
        ExtractionError::ArchiveReadFailed { index, source } => {
            anyhow!(
                "Corrupt entry #{} in '{}': {}\n\
                 HINT: The archive may be truncated. Try downloading it again.",
                index,
                archive.display(),
                source
            )
        }
        ExtractionError::UnsafeEntryPath { entry_name } => {
            anyhow!(
                "Security violation: Archive '{}' contains an entry that escapes its folder: '{}'\n\
                 HINT: This archive may be malicious. Do not use archives from untrusted sources.",
                archive.display(),
                entry_name
            )
        }
        ExtractionError::ExtractionFailed { entry_name, source } => {
            anyhow!(
                "I/O error while extracting '{}' from '{}': {}",
                entry_name,
                archive.display(),
                source
            )
        }
    }
}

/// Converts `ConfigError` raised while parsing `--folder` values
pub fn convert_config_error(err: ConfigError) -> anyhow::Error {
    anyhow!(
        "Invalid folder list: {err}\n\
         HINT: Each --folder must be a single, distinct directory name such as 'mods'."
    )
}

/// Adds context to an extraction result about the archive being read
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

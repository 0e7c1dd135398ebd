//! Precondition checks run before anything on disk is touched.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::ValidationError;

/// Checks that both inputs are present and reachable.
///
/// Only existence is checked for the destination (a regular file passes).
/// The archive is opened and immediately closed; whether it is a valid ZIP
/// is decided later by the extractor.
///
/// # Errors
///
/// Returns the first failing check, in this order: empty destination, empty
/// archive path, missing destination, unreadable archive.
///
/// # Examples
///
/// ```
/// use modsync_core::ValidationError;
/// use modsync_core::validate;
///
/// let err = validate("", "pack.zip").unwrap_err();
/// assert!(matches!(err, ValidationError::EmptyDestination));
/// ```
pub fn validate<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    archive: Q,
) -> Result<(), ValidationError> {
    let destination = destination.as_ref();
    let archive = archive.as_ref();

    if destination.as_os_str().is_empty() {
        return Err(ValidationError::EmptyDestination);
    }

    if archive.as_os_str().is_empty() {
        return Err(ValidationError::EmptyArchivePath);
    }

    if let Err(e) = fs::metadata(destination)
        && e.kind() == io::ErrorKind::NotFound
    {
        return Err(ValidationError::DestinationNotFound {
            path: destination.to_path_buf(),
        });
    }

    File::open(archive).map_err(|source| ValidationError::ArchiveUnreadable {
        path: archive.to_path_buf(),
        source,
    })?;

    Ok(())
}

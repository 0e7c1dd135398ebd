//! Deleting the configured folders from the destination.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::RemovalError;
use crate::report::RemovalReport;
use crate::types::FolderSet;

/// Deletes every configured folder under `destination`, in set order.
///
/// Absent folders are skipped and recorded in [`RemovalReport::not_found`].
/// A directory is removed with its whole subtree; a file or symlink that
/// happens to carry a folder's name is removed as a single entry (symlinks
/// are never followed).
///
/// # Errors
///
/// Returns [`RemovalError::RemovalFailed`] for the first folder that cannot
/// be removed completely. Folders earlier in the set are already gone at that
/// point; later ones are left untouched.
pub fn remove_configured_folders(
    destination: &Path,
    folders: &FolderSet,
) -> Result<RemovalReport, RemovalError> {
    let mut report = RemovalReport::default();

    tracing::info!(destination = %destination.display(), "removing old folders");

    for folder in folders.iter() {
        let target = destination.join(folder);

        let metadata = match fs::symlink_metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %target.display(), "folder not found");
                report.not_found.push(target);
                continue;
            }
            Err(source) => {
                return Err(RemovalError::RemovalFailed {
                    folder: folder.to_string(),
                    path: target,
                    source,
                });
            }
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };

        if let Err(source) = removed {
            return Err(RemovalError::RemovalFailed {
                folder: folder.to_string(),
                path: target,
                source,
            });
        }

        tracing::info!(path = %target.display(), "removed folder");
        report.removed.push(target);
    }

    Ok(report)
}

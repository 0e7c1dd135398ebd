//! Listing qualifying entries without writing anything.

use std::path::Path;
use std::path::PathBuf;

use crate::error::ExtractionError;
use crate::extract::entry_name_at;
use crate::extract::open_archive;
use crate::extract::permission_bits;
use crate::types::EntryTarget;
use crate::types::FolderPrefixes;
use crate::types::FolderSet;

/// Metadata of an archive entry that an update would restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingEntry {
    /// Entry name as stored in the archive.
    pub name: String,

    /// Configured folder the entry belongs to.
    pub folder: String,

    /// Destination-relative path the entry would be written to.
    pub target: PathBuf,

    /// Whether the entry is a directory marker.
    pub is_dir: bool,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Stored Unix permission bits, if any.
    pub mode: Option<u32>,
}

/// Returns the qualifying entries of `archive`, in stored order.
///
/// Reads only the central directory; nothing is decompressed or written.
///
/// # Errors
///
/// Fails like [`crate::extract_configured_folders`] does for archive and
/// entry-name problems: `ArchiveOpenFailed`, `ArchiveReadFailed`, or
/// `UnsafeEntryPath`.
///
/// # Examples
///
/// ```no_run
/// use modsync_core::FolderSet;
/// use modsync_core::list_qualifying_entries;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// for entry in list_qualifying_entries(Path::new("pack.zip"), &FolderSet::default())? {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_qualifying_entries(
    archive: &Path,
    folders: &FolderSet,
) -> Result<Vec<QualifyingEntry>, ExtractionError> {
    let mut zip = open_archive(archive)?;
    let prefixes = FolderPrefixes::new(folders);
    let mut entries = Vec::new();

    for index in 0..zip.len() {
        let name = entry_name_at(&zip, index)?;
        let Some(target) = EntryTarget::resolve(&name, &prefixes)? else {
            continue;
        };

        let entry = zip
            .by_index_raw(index)
            .map_err(|source| ExtractionError::ArchiveReadFailed { index, source })?;

        entries.push(QualifyingEntry {
            name,
            folder: target.folder().to_string(),
            target: target.relative_path().to_path_buf(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            mode: entry.unix_mode().map(permission_bits),
        });
    }

    tracing::debug!(
        archive = %archive.display(),
        qualifying = entries.len(),
        "listed archive"
    );

    Ok(entries)
}

//! Restoring configured folders from a ZIP archive.
//!
//! Entries are visited in the order they are stored. Only qualifying entries
//! (see [`FolderPrefixes`]) are written; the first failure stops the run and
//! leaves already-written entries in place.

use std::fs::DirBuilder;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::config::SyncConfig;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::error::ExtractionError;
use crate::report::ExtractionReport;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::types::EntryTarget;
use crate::types::FolderPrefixes;

/// Mode for file entries that carry no Unix permission bits.
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Mode for directory entries that carry no Unix permission bits.
const DEFAULT_DIR_ENTRY_MODE: u32 = 0o755;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Extracts every qualifying entry of `archive` under `destination`.
///
/// # Errors
///
/// - [`ExtractionError::ArchiveOpenFailed`] if the archive cannot be opened
///   or is not a ZIP container.
/// - [`ExtractionError::ArchiveReadFailed`] if an entry header is corrupt.
/// - [`ExtractionError::UnsafeEntryPath`] if a qualifying entry would escape
///   its folder.
/// - [`ExtractionError::ExtractionFailed`] if creating a directory, creating
///   a file, or copying content fails.
///
/// # Examples
///
/// ```no_run
/// use modsync_core::SyncConfig;
/// use modsync_core::extract_configured_folders;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_configured_folders(
///     Path::new("/backups/pack.zip"),
///     Path::new("/srv/minecraft"),
///     &SyncConfig::default(),
/// )?;
/// println!("restored {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_configured_folders(
    archive: &Path,
    destination: &Path,
    config: &SyncConfig,
) -> Result<ExtractionReport, ExtractionError> {
    extract_configured_folders_with_progress(archive, destination, config, &mut NoopProgress)
}

/// Same as [`extract_configured_folders`], reporting progress per entry.
///
/// # Errors
///
/// See [`extract_configured_folders`].
pub fn extract_configured_folders_with_progress(
    archive: &Path,
    destination: &Path,
    config: &SyncConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport, ExtractionError> {
    let mut zip = open_archive(archive)?;
    let prefixes = FolderPrefixes::new(&config.folders);
    let mut report = ExtractionReport::new();
    let mut buffer = CopyBuffer::new();
    let total = zip.len();

    tracing::info!(
        archive = %archive.display(),
        entries = total,
        "extracting folders from archive"
    );

    #[cfg(not(unix))]
    tracing::warn!("permission bits are not applied on this platform");

    for index in 0..total {
        // Only qualifying entries are ever opened for reading.
        let entry_name = entry_name_at(&zip, index)?;

        let Some(target) = EntryTarget::resolve(&entry_name, &prefixes)? else {
            report.entries_skipped += 1;
            continue;
        };

        let mut entry = zip
            .by_index(index)
            .map_err(|source| ExtractionError::ArchiveReadFailed { index, source })?;

        let output_path = target.join_onto(destination);
        let stored_mode = entry.unix_mode().map(permission_bits);

        progress.on_entry_start(target.relative_path(), total, index + 1);

        if entry.is_dir() {
            let mode = stored_mode.unwrap_or(DEFAULT_DIR_ENTRY_MODE);
            create_dir_all(&output_path, mode)
                .map_err(|source| ExtractionError::ExtractionFailed { entry_name, source })?;

            tracing::debug!(
                path = %output_path.display(),
                mode = %format!("{mode:o}"),
                "created directory"
            );
            report.directories_created += 1;
        } else {
            let mode = stored_mode.unwrap_or(DEFAULT_FILE_MODE);
            let written = write_file(
                &mut entry,
                &output_path,
                mode,
                config.dir_mode,
                &mut buffer,
            )
            .map_err(|source| ExtractionError::ExtractionFailed { entry_name, source })?;

            tracing::debug!(path = %output_path.display(), bytes = written, "extracted file");
            report.files_extracted += 1;
            report.bytes_written += written;
            progress.on_bytes_written(written);
        }

        progress.on_entry_complete(target.relative_path());
    }

    progress.on_complete();

    tracing::info!(
        files = report.files_extracted,
        directories = report.directories_created,
        skipped = report.entries_skipped,
        "extraction finished"
    );

    Ok(report)
}

/// Opens `path` as a ZIP archive.
pub(crate) fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, ExtractionError> {
    let file = File::open(path).map_err(|e| ExtractionError::ArchiveOpenFailed {
        path: path.to_path_buf(),
        source: ZipError::from(e),
    })?;

    ZipArchive::new(BufReader::new(file)).map_err(|source| ExtractionError::ArchiveOpenFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Name of entry `index`, read from the central directory only.
pub(crate) fn entry_name_at<R: Read + io::Seek>(
    zip: &ZipArchive<R>,
    index: usize,
) -> Result<String, ExtractionError> {
    zip.name_for_index(index)
        .map(str::to_string)
        .ok_or(ExtractionError::ArchiveReadFailed {
            index,
            source: ZipError::FileNotFound,
        })
}

/// Strips file-type bits, keeping permission, setuid/setgid and sticky bits.
pub(crate) const fn permission_bits(mode: u32) -> u32 {
    mode & 0o7777
}

/// Creates `path` and any missing ancestors. Existing directories are fine.
fn create_dir_all(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}

/// Writes one file entry, creating its parents with `dir_mode` first.
fn write_file<R: Read>(
    reader: &mut R,
    path: &Path,
    mode: u32,
    dir_mode: u32,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent, dir_mode)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let file = options.open(path)?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    let written = copy_with_buffer(reader, &mut writer, buffer)?;
    writer.flush()?;

    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::corrupt_stored_content;
    use crate::test_utils::set_compression_method;
    use crate::types::FolderSet;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(folders: &[&str]) -> SyncConfig {
        SyncConfig::default().with_folders(FolderSet::new(folders.iter().copied()).unwrap())
    }

    fn write_archive(dir: &Path, data: &[u8]) -> PathBuf {
        let path = dir.join("pack.zip");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_extract_specific_folders() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file("config/test.cfg", b"config content")
                .add_file("mods/test.mod", b"mod content")
                .add_file("ignored/file.txt", b"this should be ignored")
                .build(),
        );
        let dest = temp.path().join("extracted");
        fs::create_dir(&dest).unwrap();

        let report = extract_configured_folders(&archive, &dest, &config(&["config", "mods"]))
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("config/test.cfg")).unwrap(),
            "config content"
        );
        assert_eq!(fs::read_to_string(dest.join("mods/test.mod")).unwrap(), "mod content");
        assert!(!dest.join("ignored").exists());
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.entries_skipped, 1);
        assert_eq!(report.bytes_written, 25);
    }

    #[test]
    fn test_directory_entries() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_directory("mods/")
                .add_directory("mods/empty/")
                .add_directory("saves/")
                .build(),
        );

        let report = extract_configured_folders(&archive, temp.path(), &config(&["mods"])).unwrap();

        assert!(temp.path().join("mods/empty").is_dir());
        assert!(!temp.path().join("saves").exists());
        assert_eq!(report.directories_created, 2);
        assert_eq!(report.files_extracted, 0);
    }

    #[test]
    fn test_existing_directory_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new().add_directory("config/").build(),
        );

        assert!(extract_configured_folders(&archive, temp.path(), &config(&["config"])).is_ok());
    }

    #[test]
    fn test_file_overwrites_existing_content() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join("config/a.cfg"), "a much longer stale value").unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new().add_file("config/a.cfg", b"X").build(),
        );

        extract_configured_folders(&archive, temp.path(), &config(&["config"])).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("config/a.cfg")).unwrap(), "X");
    }

    #[test]
    fn test_boundary_prefix_not_extracted() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file("modernfixtures/a.txt", b"nope")
                .add_file("modernfix/b.txt", b"yes")
                .build(),
        );

        extract_configured_folders(&archive, temp.path(), &config(&["modernfix"])).unwrap();

        assert!(temp.path().join("modernfix/b.txt").exists());
        assert!(!temp.path().join("modernfixtures").exists());
    }

    #[test]
    fn test_deflated_entries() {
        let temp = TempDir::new().unwrap();
        let content = "line of config\n".repeat(4096);
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_deflated_file("config/big.toml", content.as_bytes())
                .build(),
        );

        extract_configured_folders(&archive, temp.path(), &config(&["config"])).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("config/big.toml")).unwrap(),
            content
        );
    }

    #[test]
    fn test_traversal_entry_aborts() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file("mods/ok.jar", b"ok")
                .add_file("mods/../../escaped.txt", b"evil")
                .add_file("mods/later.jar", b"later")
                .build(),
        );

        let err = extract_configured_folders(&archive, &dest, &config(&["mods"])).unwrap_err();

        assert!(matches!(err, ExtractionError::UnsafeEntryPath { .. }));
        assert!(!temp.path().join("escaped.txt").exists());
        assert!(dest.join("mods/ok.jar").exists(), "earlier entries stay on disk");
        assert!(!dest.join("mods/later.jar").exists(), "later entries are not written");
    }

    #[test]
    fn test_file_creation_failure_names_entry() {
        let temp = TempDir::new().unwrap();
        // A file where a directory is needed makes the parent creation fail.
        fs::write(temp.path().join("config"), "blocker").unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new().add_file("config/a.cfg", b"X").build(),
        );

        let err = extract_configured_folders(&archive, temp.path(), &config(&["config"]))
            .unwrap_err();

        match err {
            ExtractionError::ExtractionFailed { entry_name, .. } => {
                assert_eq!(entry_name, "config/a.cfg");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_ignored_entry_is_never_opened() {
        let temp = TempDir::new().unwrap();
        let mut data = ZipTestBuilder::new()
            .add_file("extra/big.bin", b"opaque payload")
            .add_file("config/a.cfg", b"X")
            .build();
        set_compression_method(&mut data, "extra/big.bin", 93);
        let archive = write_archive(temp.path(), &data);

        let report = extract_configured_folders(&archive, temp.path(), &config(&["config"]))
            .unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("config/a.cfg")).unwrap(), "X");
        assert_eq!(report.entries_skipped, 1);
        assert!(!temp.path().join("extra").exists());
    }

    #[test]
    fn test_undecodable_qualifying_entry_fails_to_read() {
        let temp = TempDir::new().unwrap();
        let mut data = ZipTestBuilder::new()
            .add_file("config/a.cfg", b"X")
            .add_file("config/b.cfg", b"Y")
            .build();
        set_compression_method(&mut data, "config/b.cfg", 93);
        let archive = write_archive(temp.path(), &data);

        let err = extract_configured_folders(&archive, temp.path(), &config(&["config"]))
            .unwrap_err();

        assert!(matches!(err, ExtractionError::ArchiveReadFailed { index: 1, .. }));
        assert!(temp.path().join("config/a.cfg").exists());
    }

    #[test]
    fn test_corrupt_qualifying_content_names_entry() {
        let temp = TempDir::new().unwrap();
        let mut data = ZipTestBuilder::new()
            .add_file("mods/lib.jar", b"original payload")
            .build();
        corrupt_stored_content(&mut data, b"original payload", b"tampered payload");
        let archive = write_archive(temp.path(), &data);

        let err = extract_configured_folders(&archive, temp.path(), &config(&["mods"]))
            .unwrap_err();

        assert_eq!(err.entry_name(), Some("mods/lib.jar"));
        assert!(matches!(err, ExtractionError::ExtractionFailed { .. }));
    }

    #[test]
    fn test_current_dir_component_is_flattened() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file("mods/./a.jar", b"A")
                .add_file("mods/b.jar", b"B")
                .build(),
        );

        let report = extract_configured_folders(&archive, temp.path(), &config(&["mods"])).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("mods/a.jar")).unwrap(), "A");
        assert_eq!(fs::read_to_string(temp.path().join("mods/b.jar")).unwrap(), "B");
        assert_eq!(report.files_extracted, 2);
    }

    #[test]
    fn test_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(temp.path(), b"definitely not a zip file");

        let err = extract_configured_folders(&archive, temp.path(), &SyncConfig::default())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ArchiveOpenFailed { .. }));
    }

    #[test]
    fn test_missing_archive() {
        let temp = TempDir::new().unwrap();
        let err = extract_configured_folders(
            Path::new("nonexistent.zip"),
            temp.path(),
            &SyncConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::ArchiveOpenFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_bits_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file_with_mode("mods/run.sh", b"#!/bin/sh\n", 0o700)
                .add_file_with_mode("mods/secret.cfg", b"token", 0o600)
                .build(),
        );

        extract_configured_folders(&archive, temp.path(), &config(&["mods"])).unwrap();

        let mode = |p: &str| {
            fs::metadata(temp.path().join(p)).unwrap().permissions().mode() & 0o777
        };
        assert_eq!(mode("mods/run.sh"), 0o700);
        assert_eq!(mode("mods/secret.cfg"), 0o600);
    }

    #[test]
    fn test_progress_events() {
        #[derive(Default)]
        struct Recorder {
            started: Vec<(PathBuf, usize, usize)>,
            completed: usize,
            bytes: u64,
            finished: bool,
        }

        impl ProgressCallback for Recorder {
            fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
                self.started.push((path.to_path_buf(), total, current));
            }
            fn on_bytes_written(&mut self, bytes: u64) {
                self.bytes += bytes;
            }
            fn on_entry_complete(&mut self, _path: &Path) {
                self.completed += 1;
            }
            fn on_complete(&mut self) {
                self.finished = true;
            }
        }

        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            temp.path(),
            &ZipTestBuilder::new()
                .add_file("extra/c.txt", b"Z")
                .add_file("config/a.cfg", b"XYZ")
                .build(),
        );

        let mut recorder = Recorder::default();
        extract_configured_folders_with_progress(
            &archive,
            temp.path(),
            &config(&["config"]),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(
            recorder.started,
            vec![(PathBuf::from("config").join("a.cfg"), 2, 2)]
        );
        assert_eq!(recorder.completed, 1);
        assert_eq!(recorder.bytes, 3);
        assert!(recorder.finished);
    }

    #[test]
    fn test_permission_bits_mask() {
        assert_eq!(permission_bits(0o100_644), 0o644);
        assert_eq!(permission_bits(0o040_755), 0o755);
        assert_eq!(permission_bits(0o104_755), 0o4755);
    }
}

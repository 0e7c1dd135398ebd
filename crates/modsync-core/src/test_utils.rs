//! Test helpers for building ZIP archives in memory.
//!
//! # Panics
//!
//! Builder methods panic on I/O errors; they are meant for tests only.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for ZIP test archives. Entries keep the order they are added in.
///
/// # Examples
///
/// ```
/// use modsync_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("config/")
///     .add_file("config/a.cfg", b"X")
///     .add_file("mods/b.mod", b"Y")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a stored file with a custom Unix mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed file with mode 0o644.
    #[must_use]
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry with mode 0o755.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the archive bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`.
    pub fn write_to(self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const LOCAL_HEADER_SIGNATURE: &[u8] = b"PK\x03\x04";
const CENTRAL_HEADER_SIGNATURE: &[u8] = b"PK\x01\x02";

/// Rewrites the compression method of `entry_name` in both its local and
/// central directory headers.
///
/// Used to produce entries the reader cannot decode (for example method 93,
/// zstd, which is not compiled in).
pub fn set_compression_method(data: &mut [u8], entry_name: &str, method: u16) {
    let name = entry_name.as_bytes();
    let mut patched = 0;

    for i in 0..data.len() {
        // (offset of compression method, offset of file name)
        let (method_at, name_at) = if data[i..].starts_with(LOCAL_HEADER_SIGNATURE) {
            (8, 30)
        } else if data[i..].starts_with(CENTRAL_HEADER_SIGNATURE) {
            (10, 46)
        } else {
            continue;
        };

        let name_range = i + name_at..i + name_at + name.len();
        if data.get(name_range) == Some(name) {
            data[i + method_at..i + method_at + 2].copy_from_slice(&method.to_le_bytes());
            patched += 1;
        }
    }

    assert_eq!(patched, 2, "entry '{entry_name}' not found in archive");
}

/// Replaces the first occurrence of `stored` (uncompressed entry content)
/// with `replacement` of the same length, leaving the stored CRC stale.
pub fn corrupt_stored_content(data: &mut [u8], stored: &[u8], replacement: &[u8]) {
    assert_eq!(stored.len(), replacement.len());
    let at = data
        .windows(stored.len())
        .position(|w| w == stored)
        .unwrap();
    data[at..at + stored.len()].copy_from_slice(replacement);
}

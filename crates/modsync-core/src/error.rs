//! Error types for folder restoration.
//!
//! Each stage of an update has its own error type so callers can tell how far
//! an operation got before it stopped. [`UpdateError`] wraps all of them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `UpdateError`.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Problems with the configured folder set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The folder set contains no names.
    #[error("folder set is empty")]
    EmptyFolderSet,

    /// A folder name is not a single plain path component.
    #[error("invalid folder name '{name}': {reason}")]
    InvalidFolderName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A folder name appears more than once.
    #[error("folder '{name}' is listed more than once")]
    DuplicateFolder {
        /// The repeated name.
        name: String,
    },
}

/// Input validation failures. Always raised before anything is modified.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Destination path is empty.
    #[error("destination directory cannot be empty")]
    EmptyDestination,

    /// Archive path is empty.
    #[error("ZIP file path cannot be empty")]
    EmptyArchivePath,

    /// Destination path does not exist.
    #[error("destination directory does not exist: {}", path.display())]
    DestinationNotFound {
        /// The missing destination.
        path: PathBuf,
    },

    /// Archive could not be opened for reading.
    #[error("ZIP file does not exist or is not readable: {}", path.display())]
    ArchiveUnreadable {
        /// The archive path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Failures while deleting a configured folder from the destination.
#[derive(Error, Debug)]
pub enum RemovalError {
    /// A folder exists but could not be removed completely.
    #[error("failed to remove folder '{folder}' at {}: {source}", path.display())]
    RemovalFailed {
        /// Configured folder name.
        folder: String,
        /// Full path that was being removed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Failures while restoring folders from the archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The archive is missing or is not a valid ZIP container.
    #[error("failed to open ZIP archive {}: {source}", path.display())]
    ArchiveOpenFailed {
        /// The archive path.
        path: PathBuf,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry header could not be read from the archive.
    #[error("failed to read ZIP entry #{index}: {source}")]
    ArchiveReadFailed {
        /// Position of the entry in the central directory.
        index: usize,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A qualifying entry's name would resolve outside its folder.
    #[error("unsafe entry path in archive: {entry_name}")]
    UnsafeEntryPath {
        /// Raw entry name as stored in the archive.
        entry_name: String,
    },

    /// Writing a qualifying entry to disk failed.
    #[error("failed to extract '{entry_name}': {source}")]
    ExtractionFailed {
        /// Raw entry name as stored in the archive.
        entry_name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ExtractionError {
    /// Returns the archive entry name involved in this error, if any.
    #[must_use]
    pub fn entry_name(&self) -> Option<&str> {
        match self {
            Self::UnsafeEntryPath { entry_name } | Self::ExtractionFailed { entry_name, .. } => {
                Some(entry_name)
            }
            Self::ArchiveOpenFailed { .. } | Self::ArchiveReadFailed { .. } => None,
        }
    }
}

/// Error returned by the update entry point, tagged with the failing stage.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Inputs were rejected; the destination is untouched.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A folder could not be removed; extraction never started.
    #[error("failed to remove old folders: {0}")]
    Removal(#[from] RemovalError),

    /// Restoring from the archive failed part way.
    #[error("failed to extract folders: {0}")]
    Extraction(#[from] ExtractionError),
}

impl UpdateError {
    /// Returns `true` if the destination may have been changed before the
    /// failure.
    ///
    /// Validation failures happen before any mutation. Removal and extraction
    /// failures can leave folders deleted or partially restored; there is no
    /// automatic rollback.
    ///
    /// # Examples
    ///
    /// ```
    /// use modsync_core::UpdateError;
    /// use modsync_core::ValidationError;
    ///
    /// let err = UpdateError::from(ValidationError::EmptyDestination);
    /// assert!(!err.destination_modified());
    /// ```
    #[must_use]
    pub const fn destination_modified(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

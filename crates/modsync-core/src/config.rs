//! Restoration settings.

use crate::types::FolderSet;

/// Permission bits for ancestor directories created implicitly for files.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Configuration for an update run.
///
/// Passed by reference into every stage; nothing here is process-wide.
///
/// # Examples
///
/// ```
/// use modsync_core::FolderSet;
/// use modsync_core::SyncConfig;
///
/// // Built-in modpack folders
/// let config = SyncConfig::default();
/// assert!(config.folders.contains("mods"));
///
/// // Custom folder list
/// let custom = SyncConfig::default().with_folders(FolderSet::new(["config", "kubejs"])?);
/// assert_eq!(custom.folders.len(), 2);
/// # Ok::<(), modsync_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Folders removed from the destination and restored from the archive.
    pub folders: FolderSet,

    /// Mode used for parent directories that have no directory entry of
    /// their own in the archive.
    pub dir_mode: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            folders: FolderSet::default(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

impl SyncConfig {
    /// Replaces the folder set.
    #[must_use]
    pub fn with_folders(mut self, folders: FolderSet) -> Self {
        self.folders = folders;
        self
    }

    /// Sets the mode for implicitly created parent directories.
    #[must_use]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode & 0o7777;
        self
    }
}

//! Mapping archive entry names onto destination-relative paths.
//!
//! ZIP entry names always use `/`. An entry belongs to a configured folder
//! only when its name starts with the folder name followed by `/`, so folder
//! `mod` never claims `modernfix/...`.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ExtractionError;
use crate::types::FolderSet;

/// Separator used inside ZIP entry names, independent of the host.
const ARCHIVE_SEPARATOR: char = '/';

/// Separator-terminated prefixes built from a [`FolderSet`].
///
/// # Examples
///
/// ```
/// use modsync_core::FolderSet;
/// use modsync_core::types::FolderPrefixes;
///
/// let folders = FolderSet::new(["mod", "config"])?;
/// let prefixes = FolderPrefixes::new(&folders);
///
/// assert_eq!(prefixes.folder_for("config/a.cfg"), Some("config"));
/// assert_eq!(prefixes.folder_for("modernfix/a.txt"), None);
/// assert_eq!(prefixes.folder_for("config"), None);
/// # Ok::<(), modsync_core::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FolderPrefixes {
    prefixes: Vec<String>,
}

impl FolderPrefixes {
    /// Normalizes every folder name to `name + "/"`.
    #[must_use]
    pub fn new(folders: &FolderSet) -> Self {
        let prefixes = folders
            .iter()
            .map(|folder| format!("{folder}{ARCHIVE_SEPARATOR}"))
            .collect();
        Self { prefixes }
    }

    /// Returns the configured folder that `entry_name` lives under, if any.
    #[must_use]
    pub fn folder_for(&self, entry_name: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| entry_name.starts_with(prefix.as_str()))
            .map(|prefix| &prefix[..prefix.len() - ARCHIVE_SEPARATOR.len_utf8()])
    }

    /// Returns `true` if `entry_name` is a qualifying entry.
    #[must_use]
    pub fn matches(&self, entry_name: &str) -> bool {
        self.folder_for(entry_name).is_some()
    }
}

/// Destination-relative path of a qualifying entry, in host separators.
///
/// Construction guarantees the path stays inside its folder: every component
/// after the folder prefix is a plain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTarget {
    folder: String,
    relative: PathBuf,
}

impl EntryTarget {
    /// Resolves `entry_name` against `prefixes`.
    ///
    /// Returns `Ok(None)` for entries outside every configured folder.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::UnsafeEntryPath`] if a component after the
    /// folder prefix is `..`, a root, or otherwise not a plain name. Empty and
    /// `.` components are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use modsync_core::FolderSet;
    /// use modsync_core::types::EntryTarget;
    /// use modsync_core::types::FolderPrefixes;
    /// use std::path::Path;
    ///
    /// let prefixes = FolderPrefixes::new(&FolderSet::new(["mods"])?);
    ///
    /// let target = EntryTarget::resolve("mods/jei/jei.jar", &prefixes)?.unwrap();
    /// assert_eq!(target.relative_path(), Path::new("mods").join("jei").join("jei.jar"));
    ///
    /// assert!(EntryTarget::resolve("saves/world.dat", &prefixes)?.is_none());
    /// assert!(EntryTarget::resolve("mods/../../etc/passwd", &prefixes).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn resolve(
        entry_name: &str,
        prefixes: &FolderPrefixes,
    ) -> Result<Option<Self>, ExtractionError> {
        let Some(folder) = prefixes.folder_for(entry_name) else {
            return Ok(None);
        };

        let remainder = &entry_name[folder.len() + ARCHIVE_SEPARATOR.len_utf8()..];
        let mut relative = PathBuf::from(folder);

        for part in remainder.split(ARCHIVE_SEPARATOR).filter(|p| !p.is_empty()) {
            let mut components = Path::new(part).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) => relative.push(name),
                (Some(Component::CurDir), None) => {}
                _ => {
                    return Err(ExtractionError::UnsafeEntryPath {
                        entry_name: entry_name.to_string(),
                    });
                }
            }
        }

        Ok(Some(Self {
            folder: folder.to_string(),
            relative,
        }))
    }

    /// The configured folder this entry belongs to.
    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Path relative to the destination directory.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Joins the target onto `destination`.
    #[must_use]
    pub fn join_onto(&self, destination: &Path) -> PathBuf {
        destination.join(&self.relative)
    }
}

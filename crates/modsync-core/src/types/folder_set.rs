//! Validated, ordered set of folder names to restore.

use std::fmt;

use crate::error::ConfigError;

/// Folders restored when no explicit set is configured.
pub const DEFAULT_FOLDERS: &[&str] = &["config", "defaultconfigs", "modernfix", "mods", "schematics"];

/// An ordered, non-empty list of top-level folder names.
///
/// Every name is a single plain path component: no separators, not `.` or
/// `..`, and no duplicates. Order controls removal and reporting order only.
///
/// # Examples
///
/// ```
/// use modsync_core::FolderSet;
///
/// let folders = FolderSet::new(["config", "mods"])?;
/// assert_eq!(folders.len(), 2);
/// assert!(FolderSet::new(["../etc"]).is_err());
/// # Ok::<(), modsync_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSet(Vec<String>);

impl FolderSet {
    /// Builds a folder set, rejecting empty, nested, relative or repeated
    /// names.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first offending name.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut folders: Vec<String> = Vec::new();

        for name in names {
            let name = name.into();
            check_name(&name)?;
            if folders.contains(&name) {
                return Err(ConfigError::DuplicateFolder { name });
            }
            folders.push(name);
        }

        if folders.is_empty() {
            return Err(ConfigError::EmptyFolderSet);
        }

        Ok(Self(folders))
    }

    /// Iterates folder names in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of folders in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no folders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `name` is one of the configured folders.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|folder| folder == name)
    }
}

impl Default for FolderSet {
    fn default() -> Self {
        Self(DEFAULT_FOLDERS.iter().map(|&name| name.to_string()).collect())
    }
}

impl fmt::Display for FolderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

fn check_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name == "." || name == ".." {
        "must not be a relative path marker"
    } else if name.contains(['/', '\\']) {
        "must be a single path component"
    } else if name.contains('\0') {
        "must not contain NUL bytes"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidFolderName {
        name: name.to_string(),
        reason,
    })
}

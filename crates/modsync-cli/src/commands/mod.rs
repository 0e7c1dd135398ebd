//! Subcommand implementations.

pub mod completion;
pub mod list;
pub mod update;

use crate::error::convert_config_error;
use anyhow::Result;
use modsync_core::FolderSet;

/// Folder set from repeated `--folder` values; the built-in set when none
/// were given.
fn folder_set(folders: &[String]) -> Result<FolderSet> {
    if folders.is_empty() {
        return Ok(FolderSet::default());
    }
    FolderSet::new(folders).map_err(convert_config_error)
}

//! Update command implementation.

use super::folder_set;
use crate::cli::UpdateArgs;
use crate::error::convert_update_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use modsync_core::SyncConfig;
use modsync_core::update_folders;
use modsync_core::update_folders_with_progress;
use std::path::Path;
use std::path::PathBuf;

pub fn execute(
    args: &UpdateArgs,
    formatter: &dyn OutputFormatter,
    hide_progress: bool,
) -> Result<()> {
    let destination = resolve(&args.destination)?;
    let archive = resolve(&args.archive)?;
    let config = SyncConfig::default().with_folders(folder_set(&args.folders)?);

    formatter.format_update_start(&destination, &archive);

    // Progress bar only when not quiet, not JSON, and stderr is a terminal
    let result = if !hide_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Restoring");
        update_folders_with_progress(&destination, &archive, &config, &mut progress)
    } else {
        update_folders(&destination, &archive, &config)
    };
    let report = result.map_err(|e| convert_update_error(e, &archive))?;

    if report.extraction.total_items() == 0 {
        formatter.format_warning(&format!(
            "archive has no entries under {}; those folders are now absent",
            config.folders
        ));
    }

    formatter.format_update_result(&destination, &archive, &report)
}

/// Makes `path` absolute against the current directory.
///
/// An empty path is returned unchanged so validation can report it.
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(PathBuf::new());
    }
    std::path::absolute(path)
        .with_context(|| format!("failed to resolve path '{}'", path.display()))
}

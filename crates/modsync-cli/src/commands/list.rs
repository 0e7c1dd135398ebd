//! List command implementation

use super::folder_set;
use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use modsync_core::list_qualifying_entries;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let folders = folder_set(&args.folders)?;

    let entries = add_archive_context(
        list_qualifying_entries(&args.archive, &folders),
        &args.archive,
    )?;

    if entries.is_empty() {
        formatter.format_warning(&format!("no entries under {folders}"));
    }

    formatter.format_listing(&args.archive, &entries, args.long)
}

//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use modsync_core::QualifyingEntry;
use modsync_core::UpdateReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn display_all(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    }
}

#[derive(Serialize)]
struct UpdateOutput {
    destination: String,
    archive: String,
    removed: Vec<String>,
    not_found: Vec<String>,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    entries_skipped: usize,
    duration_ms: u128,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    folder: &'a str,
    is_dir: bool,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<u32>,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    archive: String,
    total_entries: usize,
    total_size: u64,
    entries: Vec<ListEntry<'a>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_update_start(&self, _destination: &Path, _archive: &Path) {
        // Paths are part of the final result object.
    }

    fn format_update_result(
        &self,
        destination: &Path,
        archive: &Path,
        report: &UpdateReport,
    ) -> Result<()> {
        let data = UpdateOutput {
            destination: destination.display().to_string(),
            archive: archive.display().to_string(),
            removed: Self::display_all(&report.removal.removed),
            not_found: Self::display_all(&report.removal.not_found),
            files_extracted: report.extraction.files_extracted,
            directories_created: report.extraction.directories_created,
            bytes_written: report.extraction.bytes_written,
            entries_skipped: report.extraction.entries_skipped,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("update", data))
    }

    fn format_listing(
        &self,
        archive: &Path,
        entries: &[QualifyingEntry],
        _long: bool,
    ) -> Result<()> {
        let data = ListOutput {
            archive: archive.display().to_string(),
            total_entries: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
            entries: entries
                .iter()
                .map(|e| ListEntry {
                    name: &e.name,
                    folder: &e.folder,
                    is_dir: e.is_dir,
                    size: e.size,
                    mode: e.mode,
                })
                .collect(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        // stdout carries exactly one result document
        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_entry_omits_missing_mode() {
        let entry = ListEntry {
            name: "mods/",
            folder: "mods",
            is_dir: true,
            size: 0,
            mode: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "mods/");
        assert_eq!(json["is_dir"], true);
        assert!(json.get("mode").is_none());
    }

    #[test]
    fn test_display_all() {
        let paths = [PathBuf::from("a/config"), PathBuf::from("a/mods")];
        assert_eq!(JsonFormatter::display_all(&paths), vec!["a/config", "a/mods"]);
    }
}

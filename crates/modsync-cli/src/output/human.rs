//! Human-readable output formatter with colors and styling.

use super::format_size;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use modsync_core::QualifyingEntry;
use modsync_core::UpdateReport;
use std::path::Path;
use std::path::PathBuf;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    /// Folder names for a list of removed or missing folder paths.
    fn folder_names(paths: &[PathBuf]) -> String {
        if paths.is_empty() {
            return "(none)".to_string();
        }

        paths
            .iter()
            .map(|path| {
                path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned(),
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn entry_line(entry: &QualifyingEntry) -> String {
        let type_char = if entry.is_dir { "d" } else { "-" };
        let mode_str = entry
            .mode
            .map_or_else(|| "-".to_string(), |m| format!("{m:o}"));

        format!(
            "{}{:<6} {:>10}  {}",
            type_char, mode_str, entry.size, entry.name
        )
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_update_start(&self, destination: &Path, archive: &Path) {
        if self.quiet {
            return;
        }

        let _ = self
            .term
            .write_line(&format!("Destination: {}", destination.display()));
        let _ = self
            .term
            .write_line(&format!("Archive:     {}", archive.display()));
    }

    fn format_update_result(
        &self,
        _destination: &Path,
        _archive: &Path,
        report: &UpdateReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Update complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Update complete");
        }

        let _ = self.term.write_line(&format!(
            "  Removed: {}",
            Self::folder_names(&report.removal.removed)
        ));
        let _ = self.term.write_line(&format!(
            "  Not present: {}",
            Self::folder_names(&report.removal.not_found)
        ));
        let _ = self.term.write_line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.extraction.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories: {}",
            Self::format_number(report.extraction.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            format_size(report.extraction.bytes_written)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Entries skipped: {}",
                Self::format_number(report.extraction.entries_skipped)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_listing(
        &self,
        _archive: &Path,
        entries: &[QualifyingEntry],
        long: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in entries {
                let _ = self.term.write_line(&entry.name);
            }
            return Ok(());
        }

        for entry in entries {
            let _ = self.term.write_line(&Self::entry_line(entry));
        }

        let total_size: u64 = entries.iter().map(|e| e.size).sum();
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} entries, {}",
            Self::format_number(entries.len()),
            format_size(total_size)
        ));

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let stderr = Term::stderr();
        if self.use_colors {
            let _ = stderr.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = stderr.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_folder_names() {
        assert_eq!(HumanFormatter::folder_names(&[]), "(none)");
        assert_eq!(
            HumanFormatter::folder_names(&[
                PathBuf::from("/srv/game/config"),
                PathBuf::from("/srv/game/mods"),
            ]),
            "config, mods"
        );
    }

    #[test]
    fn test_entry_line() {
        let entry = QualifyingEntry {
            name: "mods/a.jar".to_string(),
            folder: "mods".to_string(),
            target: PathBuf::from("mods/a.jar"),
            is_dir: false,
            size: 42,
            mode: Some(0o644),
        };
        assert_eq!(
            HumanFormatter::entry_line(&entry),
            "-644            42  mods/a.jar"
        );

        let dir = QualifyingEntry {
            name: "mods/".to_string(),
            folder: "mods".to_string(),
            target: PathBuf::from("mods"),
            is_dir: true,
            size: 0,
            mode: None,
        };
        assert!(HumanFormatter::entry_line(&dir).starts_with("d-"));
    }
}

//! Restore a fixed set of folders in a directory from a ZIP archive.
//!
//! `modsync-core` deletes the configured folders (by default the usual
//! modpack folders: `config`, `defaultconfigs`, `modernfix`, `mods`,
//! `schematics`) from a destination directory and re-creates them from the
//! matching entries of a ZIP archive. Entries outside those folders are
//! ignored.
//!
//! # Examples
//!
//! ```no_run
//! use modsync_core::FolderSet;
//! use modsync_core::SyncConfig;
//! use modsync_core::update_folders;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyncConfig::default().with_folders(FolderSet::new(["config", "mods"])?);
//! let report = update_folders("/srv/minecraft", "/backups/pack.zip", &config)?;
//! println!("Restored {} files", report.extraction.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod remove;
pub mod report;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
pub mod validate;

// Re-export main API types
pub use api::update_folders;
pub use api::update_folders_with_progress;
pub use config::SyncConfig;
pub use error::ConfigError;
pub use error::ExtractionError;
pub use error::RemovalError;
pub use error::Result;
pub use error::UpdateError;
pub use error::ValidationError;
pub use extract::extract_configured_folders;
pub use extract::extract_configured_folders_with_progress;
pub use inspect::QualifyingEntry;
pub use inspect::list_qualifying_entries;
pub use remove::remove_configured_folders;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::RemovalReport;
pub use report::UpdateReport;
pub use types::FolderSet;
pub use validate::validate;

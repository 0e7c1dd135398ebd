//! Validated domain types.

mod entry_target;
mod folder_set;

pub use entry_target::EntryTarget;
pub use entry_target::FolderPrefixes;
pub use folder_set::DEFAULT_FOLDERS;
pub use folder_set::FolderSet;

//! Directory utilities: filename search and recursive folder renaming.

mod filter;
mod rename;

pub use filter::{find_files, EntryKind, NameFilter};
pub use rename::{rename_folders, RenameReport, RenamedDir};

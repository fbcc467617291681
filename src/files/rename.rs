//! Recursive folder renaming.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// A directory that was renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedDir {
    /// Path before the rename
    pub from: PathBuf,
    /// Path after the rename
    pub to: PathBuf,
}

/// Summary of a [`rename_folders`] run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameReport {
    /// Renames in the order they were applied
    pub renamed: Vec<RenamedDir>,

    /// Number of directories listed, including the root
    pub directories_visited: usize,
}

impl RenameReport {
    /// Number of directories renamed.
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }
}

/// Strip `target` from the name of every directory below `root`.
///
/// The tree is walked depth-first in pre-order; siblings are visited in
/// name order. A directory whose name contains `target` is renamed with all
/// occurrences removed and the walk continues inside it under its new name.
/// `root` itself is never renamed. Files and symbolic links are left alone.
///
/// The first listing or rename failure aborts the walk; renames applied
/// before it stay in place. Renaming onto an existing sibling is refused with
/// [`Error::RenameCollision`].
///
/// # Example
///
/// ```no_run
/// let report = docproc::rename_folders("./archive", "(copy)")?;
/// println!("{} folders renamed", report.renamed_count());
/// # Ok::<(), docproc::Error>(())
/// ```
pub fn rename_folders<P: AsRef<Path>>(root: P, target: &str) -> Result<RenameReport> {
    if target.is_empty() {
        return Err(Error::EmptyPattern);
    }

    let mut report = RenameReport::default();
    process_directory(root.as_ref(), target, &mut report)?;
    Ok(report)
}

fn process_directory(dir: &Path, target: &str, report: &mut RenameReport) -> Result<()> {
    report.directories_visited += 1;

    // Collect first: renaming while iterating read_dir is unspecified.
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            children.push(entry.file_name());
        }
    }
    children.sort();

    for file_name in children {
        let original = dir.join(&file_name);

        let path = match strip_target(&file_name, target) {
            Some(new_name) => {
                let renamed = rename_one(&original, &new_name?)?;
                report.renamed.push(RenamedDir {
                    from: original,
                    to: renamed.clone(),
                });
                renamed
            }
            None => original,
        };

        process_directory(&path, target, report)?;
    }

    Ok(())
}

/// Remove every non-overlapping occurrence of `target` from `name`, leftmost
/// first. Returns `None` when `name` does not contain `target`.
///
/// Bytes outside the matches are kept as they are, so names that are not
/// valid UTF-8 survive the rename.
#[cfg(unix)]
fn strip_target(name: &OsStr, target: &str) -> Option<Result<OsString>> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    remove_all(name.as_bytes(), target.as_bytes()).map(|bytes| Ok(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn strip_target(name: &OsStr, target: &str) -> Option<Result<OsString>> {
    match name.to_str() {
        Some(name) => name
            .contains(target)
            .then(|| Ok(OsString::from(name.replace(target, "")))),
        None => Some(Err(Error::InvalidRename {
            path: PathBuf::from(name),
            reason: "name is not valid Unicode".into(),
        })),
    }
}

#[cfg(unix)]
fn remove_all(haystack: &[u8], needle: &[u8]) -> Option<Vec<u8>> {
    if needle.is_empty() || !haystack.windows(needle.len()).any(|w| w == needle) {
        return None;
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while !rest.is_empty() {
        if rest.starts_with(needle) {
            rest = &rest[needle.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    Some(out)
}

fn rename_one(path: &Path, new_name: &OsStr) -> Result<PathBuf> {
    if new_name.is_empty() {
        return Err(Error::InvalidRename {
            path: path.to_path_buf(),
            reason: "name would become empty".into(),
        });
    }

    let new_path = path.with_file_name(new_name);
    if fs::symlink_metadata(&new_path).is_ok() {
        return Err(Error::RenameCollision {
            from: path.to_path_buf(),
            to: new_path,
        });
    }

    fs::rename(path, &new_path)?;
    log::info!("Renamed: {} -> {}", path.display(), new_path.display());
    Ok(new_path)
}

//! Recursive enumeration of the source tree.
//!
//! Policy:
//! - Symlinks are not followed; symlinked files and special files are skipped.
//! - Entries are sorted by file name inside each directory, so output order is
//!   stable across runs.
//! - An unreadable directory is skipped with a warning and recorded; the walk
//!   itself never aborts.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::ExtSortError;

/// A regular file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path relative to the source root (for logs and reports).
    pub relative: PathBuf,
}

/// Result of a walk: files to copy plus subtrees that could not be read.
#[derive(Debug, Default)]
pub struct Walk {
    pub files: Vec<FileEntry>,
    /// Always `ExtSortError::Traversal`.
    pub skipped: Vec<ExtSortError>,
}

/// Walk `root` and collect every regular file.
///
/// `exclude` prunes one subtree (used when the destination lives inside the
/// source, so a second run does not pick up the first run's output).
pub fn walk_files(root: &Path, exclude: Option<&Path>) -> Walk {
    let mut walk = Walk::default();

    let iter = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| match exclude {
            Some(x) => !(e.depth() > 0 && e.path() == x),
            None => true,
        });

    for item in iter {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let reason = err
                    .io_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                warn!(path = %path.display(), %reason, "Skipping unreadable subtree");
                walk.skipped.push(ExtSortError::Traversal { path, reason });
                continue;
            }
        };

        let ft = entry.file_type();
        if ft.is_dir() {
            continue;
        }
        if !ft.is_file() {
            debug!(path = %entry.path().display(), "Skipping non-regular file");
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        walk.files.push(FileEntry {
            path: entry.into_path(),
            relative,
        });
    }

    debug!(
        root = %root.display(),
        files = walk.files.len(),
        skipped = walk.skipped.len(),
        "Walk finished"
    );
    walk
}

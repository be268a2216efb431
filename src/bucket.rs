//! Extension bucket classification.
//!
//! Bucket names are the lowercased extension as reported by `Path::extension`:
//! - `a.TXT` -> `txt`, `a.tar.gz` -> `gz`
//! - `README`, `name.` and dotfiles such as `.gitignore` -> `no_extension`
//!
//! File names themselves are never rewritten; only the folder is lowercased.

use std::path::{Path, PathBuf};

use crate::config::NO_EXTENSION_BUCKET;

/// Bucket key for a file path.
pub fn bucket_for(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => ext.to_string_lossy().to_lowercase(),
        _ => NO_EXTENSION_BUCKET.to_string(),
    }
}

/// `destination/<bucket>/<file name>` for a source file.
/// None if the source path has no final component.
pub fn bucket_destination(destination: &Path, source: &Path) -> Option<(String, PathBuf)> {
    let name = source.file_name()?;
    let bucket = bucket_for(source);
    let target = destination.join(&bucket).join(name);
    Some((bucket, target))
}

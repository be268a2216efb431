//! Copying one file into its bucket.
//!
//! Direct mode writes the final name in place (create + truncate).
//! Staged mode copies to a hidden temp file in the bucket, fsyncs it, renames it
//! over the final name and fsyncs the bucket directory; the temp file is
//! removed again on any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::CopyMode;

use super::helpers::io_error_with_help;
use super::io_copy::{Durability, Target, copy_streaming};
use super::util::{fsync_dir, unique_temp_path};

/// Create `dir` and any missing parents. Succeeds if it already exists, including
/// when a sibling worker created it a moment earlier.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir).map_err(io_error_with_help("create bucket directory", dir))
}

/// Copy `src` to `dest` (whose parent must exist) using `mode`. Returns bytes copied.
pub fn copy_file(src: &Path, dest: &Path, mode: CopyMode) -> io::Result<u64> {
    match mode {
        CopyMode::Direct => copy_streaming(src, dest, Target::Overwrite, Durability::Data)
            .map_err(io_error_with_help("copy file", src)),
        CopyMode::Staged => staged_copy(src, dest),
    }
}

fn staged_copy(src: &Path, dest: &Path) -> io::Result<u64> {
    let dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no parent: {}", dest.display()),
        )
    })?;
    let tmp = unique_temp_path(dir);

    let bytes = match copy_streaming(src, &tmp, Target::Fresh, Durability::Full) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io_error_with_help("copy to temporary file", src)(e));
        }
    };

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }

    // The rename already happened; a failed directory sync must not turn it into a failure.
    let _ = fsync_dir(dir);
    Ok(bytes)
}

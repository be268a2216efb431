//! Platform-specific helpers.
//! Hides Unix/Windows differences for the few places that care.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open a log file for appending, creating it (and its parent) if needed.
/// On Unix a newly created file gets mode 0600; an existing file keeps its mode.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let mut opts = OpenOptions::new();
    opts.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }

    opts.open(path)
}

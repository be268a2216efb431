//! I/O error descriptions.
//!
//! Turns an `io::Error` into a one-line reason with the operation, the path and,
//! where one is known, a hint the user can act on. These strings end up in
//! per-file failure records and in the end-of-run summary.

use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and modes"),
            libc::ENOENT => Some("path not found; it may have been removed during the run"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::EMFILE => Some("process file descriptor limit reached; lower --workers"),
            libc::ENFILE => Some("system-wide file table overflow; lower --workers"),
            libc::ENAMETOOLONG => Some("file name or path too long"),
            libc::EISDIR => Some("a directory is in the way"),
            libc::ENOTDIR => Some("a file is in the way of a directory"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and modes"),
        io::ErrorKind::NotFound => Some("path not found; it may have been removed during the run"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format `"<op> '<path>': <error>"` plus a hint and the raw OS code when available.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for `.map_err(...)` in io::Result code: keeps the ErrorKind, enriches the message.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}

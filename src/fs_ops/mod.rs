//! Filesystem operations used by the copier.

mod copy;
mod helpers;
mod io_copy;
mod util;

pub use copy::{copy_file, ensure_dir};

//! Core library for `ext_sort`.
//!
//! One run is three forward-only steps:
//! 1. [`resolve_paths`] validates the source and ensures the destination exists.
//! 2. [`walk_files`] lists every regular file under the source.
//! 3. [`copy_all`] copies each file into `destination/<extension>/` on a bounded pool.
//!
//! [`run_sort`] chains them; the binary adds config loading, logging and the summary.

pub mod bucket;
pub mod cli;
pub mod config;
pub mod copier;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod report;
pub mod resolve;
pub mod shutdown;
pub mod walker;

use std::time::Instant;
use tracing::{info, warn};

pub use bucket::bucket_for;
pub use config::{Config, CopyMode, LogLevel, NO_EXTENSION_BUCKET};
pub use copier::{CopyOptions, CopyReport, copy_all};
pub use errors::{CopyFailure, ExtSortError};
pub use report::SortReport;
pub use resolve::{ResolvedPaths, resolve_paths};
pub use shutdown::Shutdown;
pub use walker::{FileEntry, Walk, walk_files};

/// Resolve, walk and copy according to `cfg`.
///
/// Setup errors are returned before anything is copied. Per-file copy failures
/// do not make this return `Err`; they are in the report, and
/// [`SortReport::check`] turns them into `ExtSortError::CopyAggregate`.
pub fn run_sort(cfg: &Config, shutdown: &Shutdown) -> Result<SortReport, ExtSortError> {
    let started = Instant::now();

    let paths = resolve_paths(&cfg.source, &cfg.destination, cfg.dry_run)?;
    info!(
        source = %paths.source.display(),
        destination = %paths.destination.display(),
        created = paths.created_destination,
        "Paths resolved"
    );

    // Keep the output of earlier runs out of the input when the destination is nested.
    let exclude = paths
        .destination
        .starts_with(&paths.source)
        .then_some(paths.destination.as_path());
    if exclude.is_some() {
        warn!(
            destination = %paths.destination.display(),
            "Destination is inside the source; excluding it from the walk"
        );
    }

    let walk = walk_files(&paths.source, exclude);
    info!(files = walk.files.len(), skipped = walk.skipped.len(), "Source walked");

    let opts = CopyOptions {
        workers: cfg.workers,
        mode: cfg.copy_mode,
        dry_run: cfg.dry_run,
        shutdown: shutdown.clone(),
    };
    let copy = copy_all(&walk.files, &paths.destination, &opts)?;

    Ok(SortReport {
        source: paths.source,
        destination: paths.destination,
        discovered: walk.files.len(),
        copy,
        skipped: walk.skipped,
        elapsed: started.elapsed(),
        dry_run: cfg.dry_run,
    })
}

//! Concurrent copy of discovered files into their buckets.
//!
//! Files are grouped by target path, and each group is one task on a dedicated
//! rayon pool sized by `CopyOptions::workers`. `ThreadPool::install` returns
//! only after every task has finished, and each file reports its own outcome,
//! so one failure never cancels its siblings.
//!
//! Files with the same name in the same bucket share a group and are copied one
//! after another in walk order, so the last one walked is what remains. Two
//! writers never hold the same target open at once.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::bucket::bucket_destination;
use crate::config::CopyMode;
use crate::errors::{CopyFailure, ExtSortError};
use crate::fs_ops::{copy_file, ensure_dir};
use crate::shutdown::Shutdown;
use crate::walker::FileEntry;

#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Pool size; 0 = available parallelism.
    pub workers: usize,
    pub mode: CopyMode,
    pub dry_run: bool,
    pub shutdown: Shutdown,
}

/// A file that reached its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bucket: String,
    pub bytes: u64,
}

/// Everything the copy phase produced, successes and failures alike.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: Vec<CopiedFile>,
    pub failures: Vec<CopyFailure>,
    /// Queued files dropped because a shutdown was requested.
    pub interrupted: Vec<PathBuf>,
}

impl CopyReport {
    pub fn was_interrupted(&self) -> bool {
        !self.interrupted.is_empty()
    }

    pub fn bytes(&self) -> u64 {
        self.copied.iter().map(|c| c.bytes).sum()
    }

    /// Files copied per bucket, ordered by bucket name.
    pub fn buckets(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.copied {
            *counts.entry(c.bucket.clone()).or_insert(0) += 1;
        }
        counts
    }
}

enum Outcome {
    Copied(CopiedFile),
    Failed(CopyFailure),
    Interrupted(PathBuf),
}

fn build_pool(workers: usize) -> Result<ThreadPool, ExtSortError> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ext-sort-copy-{i}"))
        .build()
        .map_err(|e| ExtSortError::Config(format!("cannot start copy workers: {e}")))
}

/// Copy every entry into `destination/<bucket>/`.
pub fn copy_all(
    files: &[FileEntry],
    destination: &Path,
    opts: &CopyOptions,
) -> Result<CopyReport, ExtSortError> {
    let pool = build_pool(opts.workers)?;
    debug!(
        files = files.len(),
        workers = pool.current_num_threads(),
        mode = %opts.mode,
        "Dispatching copies"
    );

    let groups = group_by_target(files, destination);
    let outcomes: Vec<Outcome> = pool.install(|| {
        groups
            .par_iter()
            .flat_map_iter(|group| group.iter().map(move |entry| copy_one(entry, destination, opts)))
            .collect()
    });

    let mut report = CopyReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Copied(c) => report.copied.push(c),
            Outcome::Failed(f) => report.failures.push(f),
            Outcome::Interrupted(path) => report.interrupted.push(path),
        }
    }
    Ok(report)
}

/// Entries sharing a target path end up in one group, in walk order.
fn group_by_target<'a>(files: &'a [FileEntry], destination: &Path) -> Vec<Vec<&'a FileEntry>> {
    let mut groups: Vec<Vec<&FileEntry>> = Vec::with_capacity(files.len());
    let mut index: HashMap<PathBuf, usize> = HashMap::with_capacity(files.len());
    for entry in files {
        match bucket_destination(destination, &entry.path) {
            Some((_, target)) => match index.get(&target) {
                Some(&i) => groups[i].push(entry),
                None => {
                    index.insert(target, groups.len());
                    groups.push(vec![entry]);
                }
            },
            None => groups.push(vec![entry]),
        }
    }
    groups
}

fn copy_one(entry: &FileEntry, destination: &Path, opts: &CopyOptions) -> Outcome {
    if opts.shutdown.is_requested() {
        return Outcome::Interrupted(entry.path.clone());
    }

    let Some((bucket, target)) = bucket_destination(destination, &entry.path) else {
        return fail(entry, destination.to_path_buf(), "source has no file name".into());
    };

    if opts.dry_run {
        info!(src = %entry.path.display(), dest = %target.display(), %bucket, "dry-run: would copy");
        return Outcome::Copied(CopiedFile {
            source: entry.path.clone(),
            destination: target,
            bucket,
            bytes: 0,
        });
    }

    // Only possible when the source root sits inside the destination root;
    // truncating the target would destroy the source.
    if target == entry.path {
        debug!(path = %target.display(), "Already in its bucket");
        let bytes = entry.path.metadata().map(|m| m.len()).unwrap_or(0);
        return Outcome::Copied(CopiedFile {
            source: entry.path.clone(),
            destination: target,
            bucket,
            bytes,
        });
    }

    let bucket_dir = destination.join(&bucket);
    if let Err(e) = ensure_dir(&bucket_dir) {
        return fail(entry, target, e.to_string());
    }

    match copy_file(&entry.path, &target, opts.mode) {
        Ok(bytes) => {
            info!(src = %entry.path.display(), dest = %target.display(), %bucket, bytes, "Copied");
            Outcome::Copied(CopiedFile {
                source: entry.path.clone(),
                destination: target,
                bucket,
                bytes,
            })
        }
        Err(e) => fail(entry, target, e.to_string()),
    }
}

fn fail(entry: &FileEntry, destination: PathBuf, reason: String) -> Outcome {
    error!(src = %entry.path.display(), dest = %destination.display(), %reason, "Copy failed");
    Outcome::Failed(CopyFailure {
        source: entry.path.clone(),
        destination,
        reason,
    })
}

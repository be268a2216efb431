//! Run summary: what was found, copied, skipped and what failed.

use std::path::PathBuf;
use std::time::Duration;

use crate::copier::CopyReport;
use crate::errors::ExtSortError;

#[derive(Debug)]
pub struct SortReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Regular files found by the walk.
    pub discovered: usize,
    pub copy: CopyReport,
    /// Subtrees the walk could not read (`ExtSortError::Traversal`).
    pub skipped: Vec<ExtSortError>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

impl SortReport {
    /// Overall verdict: Ok, `Interrupted`, or `CopyAggregate` with every per-file failure.
    /// Skipped subtrees are warnings and never fail the run.
    pub fn check(&self) -> Result<(), ExtSortError> {
        if !self.copy.failures.is_empty() {
            return Err(ExtSortError::CopyAggregate(self.copy.failures.clone()));
        }
        if self.copy.was_interrupted() {
            return Err(ExtSortError::Interrupted);
        }
        Ok(())
    }

    /// Human-readable summary, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let verb = if self.dry_run { "would be copied" } else { "copied" };
        let mut lines = vec![format!(
            "{} of {} file(s) {} ({} bytes) from '{}' to '{}' in {:.2?}; {} failed",
            self.copy.copied.len(),
            self.discovered,
            verb,
            self.copy.bytes(),
            self.source.display(),
            self.destination.display(),
            self.elapsed,
            self.copy.failures.len(),
        )];

        for (bucket, n) in self.copy.buckets() {
            lines.push(format!("  {bucket}: {n}"));
        }
        for s in &self.skipped {
            lines.push(format!("  skipped: {s}"));
        }
        if self.copy.was_interrupted() {
            lines.push(format!(
                "  interrupted: {} queued file(s) were not copied",
                self.copy.interrupted.len()
            ));
        }
        for f in &self.copy.failures {
            lines.push(format!("  failed: {f}"));
        }
        lines
    }
}

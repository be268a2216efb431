//! Typed error definitions for ext_sort.
//! Fatal setup errors abort before any copy starts; per-file failures are
//! collected and surfaced together once the copy pool has drained.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One file that could not be copied into its bucket.
#[derive(Debug, Clone)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: String,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.source.display(),
            self.destination.display(),
            self.reason
        )
    }
}

#[derive(Debug, Error)]
pub enum ExtSortError {
    #[error("Source path is missing or not a readable directory: {0}")]
    InvalidSource(PathBuf),

    #[error("Source and destination resolve to the same directory: {0}")]
    SameDirectory(PathBuf),

    #[error("Cannot create destination directory {path}: {source}")]
    DestinationCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read directory {path}: {reason}")]
    Traversal { path: PathBuf, reason: String },

    #[error("{} file(s) failed to copy", .0.len())]
    CopyAggregate(Vec<CopyFailure>),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExtSortError {
    /// Stable machine-readable kind, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            ExtSortError::InvalidSource(_) => "invalid_source",
            ExtSortError::SameDirectory(_) => "same_directory",
            ExtSortError::DestinationCreation { .. } => "destination_creation",
            ExtSortError::Traversal { .. } => "traversal",
            ExtSortError::CopyAggregate(_) => "copy_aggregate",
            ExtSortError::Interrupted => "interrupted",
            ExtSortError::Config(_) => "config",
        }
    }

    /// Process exit code: 1 for setup/config problems, 2 for partial copy failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtSortError::CopyAggregate(_) => 2,
            ExtSortError::Interrupted => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_split_setup_from_copy_failures() {
        assert_eq!(ExtSortError::InvalidSource(PathBuf::from("/nope")).exit_code(), 1);
        assert_eq!(ExtSortError::Config("bad".into()).exit_code(), 1);
        assert_eq!(ExtSortError::CopyAggregate(Vec::new()).exit_code(), 2);
        assert_eq!(ExtSortError::Interrupted.exit_code(), 130);
    }

    #[test]
    fn aggregate_message_counts_failures() {
        let f = CopyFailure {
            source: PathBuf::from("/src/a.txt"),
            destination: PathBuf::from("/dst/txt/a.txt"),
            reason: "denied".into(),
        };
        let err = ExtSortError::CopyAggregate(vec![f.clone(), f]);
        assert_eq!(err.to_string(), "2 file(s) failed to copy");
        let ExtSortError::CopyAggregate(list) = &err else {
            panic!("expected aggregate, got {err:?}");
        };
        assert_eq!(list.len(), 2);
        assert!(list[0].to_string().contains("denied"));
    }
}

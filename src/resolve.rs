//! Resolving the source and destination roots.
//! - The source must be an existing, readable directory.
//! - The destination is created (with parents) when missing.
//!
//! Source checks run first so a bad source never leaves a fresh destination
//! directory behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::errors::ExtSortError;

/// Validated, canonical roots for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// True when this call created the destination root.
    pub created_destination: bool,
}

/// Validate `source`, then ensure `destination` exists.
///
/// With `dry_run` the destination is only checked, never created; a missing
/// destination is then reported as an absolute path under the current directory.
pub fn resolve_paths(
    source: &Path,
    destination: &Path,
    dry_run: bool,
) -> Result<ResolvedPaths, ExtSortError> {
    let source = validate_source(source)?;

    let dest_exists = destination.exists();
    if dest_exists {
        let real = dunce::canonicalize(destination).map_err(|e| destination_error(destination, e))?;
        if real == source {
            error!(path = %real.display(), "Source and destination are the same directory");
            return Err(ExtSortError::SameDirectory(real));
        }
        if !real.is_dir() {
            error!(path = %real.display(), "Destination exists but isn't a directory");
            return Err(destination_error(
                destination,
                io::Error::new(io::ErrorKind::AlreadyExists, "exists but is not a directory"),
            ));
        }
        debug!(path = %real.display(), "Destination exists");
        return Ok(ResolvedPaths {
            source,
            destination: real,
            created_destination: false,
        });
    }

    if dry_run {
        let planned = std::path::absolute(destination).map_err(|e| destination_error(destination, e))?;
        info!(path = %planned.display(), "dry-run: would create destination");
        return Ok(ResolvedPaths {
            source,
            destination: planned,
            created_destination: false,
        });
    }

    fs::create_dir_all(destination).map_err(|e| {
        error!(path = %destination.display(), error = %e, "Failed to create destination");
        destination_error(destination, e)
    })?;
    let real = dunce::canonicalize(destination).map_err(|e| destination_error(destination, e))?;
    info!(path = %real.display(), "Created destination directory");

    Ok(ResolvedPaths {
        source,
        destination: real,
        created_destination: true,
    })
}

/// Source must exist, be a directory and be listable.
fn validate_source(source: &Path) -> Result<PathBuf, ExtSortError> {
    let invalid = || ExtSortError::InvalidSource(source.to_path_buf());

    if !source.is_dir() {
        error!(path = %source.display(), "Source does not exist or is not a directory");
        return Err(invalid());
    }
    if let Err(e) = fs::read_dir(source) {
        error!(path = %source.display(), error = %e, "Cannot read source directory");
        return Err(invalid());
    }
    let real = dunce::canonicalize(source).map_err(|_| invalid())?;
    debug!(path = %real.display(), "Source readable");
    Ok(real)
}

fn destination_error(path: &Path, source: io::Error) -> ExtSortError {
    ExtSortError::DestinationCreation {
        path: path.to_path_buf(),
        source,
    }
}

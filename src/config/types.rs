//! Core configuration types.
//! - Config holds runtime settings for one sort run.
//! - LogLevel and CopyMode are small enums with forgiving string parsing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// One line per copy plus the summary (default)
    #[default]
    Normal,
    /// Adds resolver/walker detail
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// How a single file reaches its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Write straight into the final name, truncating any previous file.
    #[default]
    Direct,
    /// Write a hidden temp file in the bucket, fsync, then rename over the final name.
    Staged,
}

impl FromStr for CopyMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(CopyMode::Direct),
            "staged" | "atomic" => Ok(CopyMode::Staged),
            other => Err(format!("invalid copy mode: '{other}' (expected direct or staged)")),
        }
    }
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CopyMode::Direct => "direct",
            CopyMode::Staged => "staged",
        })
    }
}

/// Runtime configuration for one classify-and-copy pass.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Tree to scan
    pub source: PathBuf,
    /// Root that receives one folder per bucket
    pub destination: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Copy worker count; 0 lets the pool pick the available parallelism
    pub workers: usize,
    pub copy_mode: CopyMode,
    /// If true, log planned copies but do not modify the filesystem
    pub dry_run: bool,
}

impl Config {
    /// Construct a Config for the given source/destination; other fields use defaults.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_mode_accepts_atomic_alias() {
        assert_eq!("ATOMIC".parse::<CopyMode>(), Ok(CopyMode::Staged));
        assert_eq!(" direct ".parse::<CopyMode>(), Ok(CopyMode::Direct));
        assert!("fast".parse::<CopyMode>().is_err());
    }

    #[test]
    fn new_uses_defaults() {
        let cfg = Config::new("/in", "/out");
        assert_eq!(cfg.workers, 0);
        assert_eq!(cfg.copy_mode, CopyMode::Direct);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert!(!cfg.dry_run);
    }
}

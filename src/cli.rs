//! CLI definition and parsing.
//!
//! Notes:
//! - SOURCE and DESTINATION are required unless --print-config is given.
//! - --debug is a shorthand for --log-level debug and wins over it.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, CopyMode, LogLevel};

/// Copy every file under SOURCE into DESTINATION/<extension>/.
/// CLI flags override values from the config file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sort a directory tree into per-extension folders")]
pub struct Args {
    /// Directory to scan (recursively).
    #[arg(
        value_name = "SOURCE",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub source: Option<PathBuf>,

    /// Directory that receives one folder per extension; created if missing.
    #[arg(
        value_name = "DESTINATION",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub destination: Option<PathBuf>,

    /// Number of concurrent copy workers (default: available parallelism).
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Copy through a temp file and rename, so no half-written file is ever visible.
    #[arg(long)]
    pub staged: bool,

    /// Show what would be copied, but do not touch the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the config file location used by ext_sort and exit.
    #[arg(long)]
    pub print_config: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source = src.clone();
        }
        if let Some(dest) = &self.destination {
            cfg.destination = dest.clone();
        }
        if let Some(n) = self.workers {
            cfg.workers = usize::from(n);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.staged {
            cfg.copy_mode = CopyMode::Staged;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

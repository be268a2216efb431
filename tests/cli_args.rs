use clap::Parser;
use ext_sort::cli::Args;
use ext_sort::{Config, CopyMode, LogLevel};
use std::path::PathBuf;
use std::process::Command;

#[test]
fn positional_source_and_destination() {
    let args = Args::parse_from(["ext_sort", "/in", "/out"]);
    assert_eq!(args.source, Some(PathBuf::from("/in")));
    assert_eq!(args.destination, Some(PathBuf::from("/out")));
}

#[test]
fn debug_wins_over_log_level() {
    let args = Args::parse_from(["ext_sort", "--debug", "--log-level", "quiet", "/in", "/out"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "ext_sort",
        "-w",
        "3",
        "--log-level",
        "info",
        "--log-file",
        "/tmp/ext_sort.log",
        "--staged",
        "--dry-run",
        "/in",
        "/out",
    ]);
    let mut cfg = Config::default();
    cfg.workers = 9;
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source, PathBuf::from("/in"));
    assert_eq!(cfg.destination, PathBuf::from("/out"));
    assert_eq!(cfg.workers, 3);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/ext_sort.log")));
    assert_eq!(cfg.copy_mode, CopyMode::Staged);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_keep_config_values() {
    let args = Args::parse_from(["ext_sort", "/in", "/out"]);
    let mut cfg = Config::default();
    cfg.workers = 5;
    cfg.copy_mode = CopyMode::Staged;
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.workers, 5);
    assert_eq!(cfg.copy_mode, CopyMode::Staged);
}

#[test]
fn zero_workers_rejected() {
    assert!(Args::try_parse_from(["ext_sort", "-w", "0", "/in", "/out"]).is_err());
}

#[test]
fn unknown_log_level_rejected() {
    assert!(Args::try_parse_from(["ext_sort", "--log-level", "loud", "/in", "/out"]).is_err());
}

#[test]
fn destination_required_without_print_config() {
    assert!(Args::try_parse_from(["ext_sort", "/in"]).is_err());
    assert!(Args::try_parse_from(["ext_sort", "--print-config"]).is_ok());
}

#[test]
fn binary_rejects_missing_args() {
    let me = assert_cmd::cargo::cargo_bin!("ext_sort");
    let out = Command::new(me).output().expect("spawn binary");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error:") || stderr.contains("Usage"), "stderr: {stderr}");
}

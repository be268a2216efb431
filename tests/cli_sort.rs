use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;
use walkdir::WalkDir;

/// Run the binary with a config path that does not exist, so a user's own
/// config file never leaks into the test.
fn run<P: AsRef<OsStr>>(args: &[P], extra: &[&str], cfg_dir: &Path) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("ext_sort");
    Command::new(me)
        .env("EXT_SORT_CONFIG", cfg_dir.join("absent.xml"))
        .args(extra)
        .args(args)
        .output()
        .expect("spawn binary")
}

/// Relative paths of every file under `root`, with forward slashes.
fn tree(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

fn sample_source(base: &Path) -> PathBuf {
    let src = base.join("src");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("b.TXT"), "b").unwrap();
    fs::write(src.join("c"), "c").unwrap();
    fs::write(src.join("sub").join("d.txt"), "d").unwrap();
    src
}

#[test]
fn sorts_sample_tree_into_buckets() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = sample_source(&base);
    let dest = base.join("dest");

    let out = run(&[&src, &dest], &["--log-level", "quiet"], &base);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let expected: BTreeSet<String> = ["txt/a.txt", "txt/b.TXT", "no_extension/c", "txt/d.txt"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(tree(&dest), expected);
    assert_eq!(fs::read_to_string(dest.join("txt/d.txt")).unwrap(), "d");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("4 of 4 file(s) copied"), "stdout: {stdout}");
    assert!(stdout.contains("txt: 3"), "stdout: {stdout}");

    // source is untouched
    assert_eq!(tree(&src).len(), 4);
}

#[test]
fn second_run_produces_same_tree() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = sample_source(&base);
    let dest = base.join("dest");

    assert!(run(&[&src, &dest], &["--log-level", "quiet"], &base).status.success());
    let first = tree(&dest);
    assert!(run(&[&src, &dest], &["--log-level", "quiet", "--staged"], &base).status.success());
    assert_eq!(tree(&dest), first);
}

#[test]
fn empty_source_creates_only_the_destination_root() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = base.join("empty");
    fs::create_dir_all(&src).unwrap();
    let dest = base.join("nested").join("dest");

    let out = run(&[&src, &dest], &[], &base);
    assert!(out.status.success());
    assert!(dest.is_dir());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn missing_source_exits_1_and_creates_nothing() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let dest = base.join("dest");

    let out = run(&[&base.join("nope"), &dest], &[], &base);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dest.exists(), "destination must not be created");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not a readable directory"), "stderr: {stderr}");
}

#[test]
fn dry_run_leaves_filesystem_alone() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = sample_source(&base);
    let dest = base.join("dest");

    let out = run(&[&src, &dest], &["--dry-run"], &base);
    assert!(out.status.success());
    assert!(!dest.exists());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("4 of 4 file(s) would be copied"), "stdout: {stdout}");
}

#[test]
fn dotfiles_land_in_no_extension() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = base.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join(".gitignore"), "target/").unwrap();
    fs::write(src.join("README"), "hi").unwrap();
    let dest = base.join("dest");

    assert!(run(&[&src, &dest], &["-w", "1"], &base).status.success());
    let expected: BTreeSet<String> = ["no_extension/.gitignore", "no_extension/README"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(tree(&dest), expected);
}

#[test]
fn print_config_reports_env_path() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let me = assert_cmd::cargo::cargo_bin!("ext_sort");
    let out = Command::new(me)
        .env("EXT_SORT_CONFIG", base.join("mine.xml"))
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("mine.xml"));
}

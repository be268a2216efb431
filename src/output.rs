use owo_colors::OwoColorize;

use crate::report::SortReport;

/// Small wrapper around stdout/stderr printing for consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// End-of-run summary. The headline goes to stdout (ok) or stderr (error);
/// bucket counts, skipped subtrees and failure details follow as plain lines.
pub fn print_summary(report: &SortReport) {
    let mut lines = report.summary_lines().into_iter();
    let Some(headline) = lines.next() else {
        return;
    };
    let ok = report.check().is_ok();
    if ok {
        print_success(&headline);
    } else {
        print_error(&headline);
    }
    for line in lines {
        if ok {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }
}

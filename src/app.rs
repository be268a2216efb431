//! Application orchestrator.
//! Loads and merges config, initializes logging, installs the Ctrl-C handler,
//! runs the sort and prints the summary.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use ext_sort::cli::Args;
use ext_sort::config::{default_config_path, load_settings};
use ext_sort::output as out;
use ext_sort::{Config, ExtSortError, Shutdown, run_sort};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let mut cfg = Config::default();
    if let Some(path) = default_config_path() {
        let settings = load_settings(&path).map_err(|e| ExtSortError::Config(format!("{e:#}")))?;
        if let Some(settings) = settings {
            settings.apply_to(&mut cfg);
        }
    }
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // The guard is dropped on Ctrl-C as well so buffered file logs are flushed.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    let shutdown = Shutdown::new();
    {
        let guard_slot = Arc::clone(&guard_slot);
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown.request();
            out::print_warn("Received interrupt; finishing in-flight copies...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            warn!(error = %e, "Could not install interrupt handler");
        }
    }

    debug!(?cfg, "Starting ext_sort");

    let result = match run_sort(&cfg, &shutdown) {
        Ok(report) => {
            out::print_summary(&report);
            report.check()
        }
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        match e {
            ExtSortError::InvalidSource(path) | ExtSortError::SameDirectory(path) => {
                error!(code = e.code(), path = %path.display(), "{e}")
            }
            ExtSortError::DestinationCreation { path, source } => {
                error!(code = e.code(), path = %path.display(), error = %source, "Cannot create destination")
            }
            ExtSortError::CopyAggregate(failures) => {
                error!(code = e.code(), failed = failures.len(), "Run finished with copy failures")
            }
            _ => error!(code = e.code(), "{e}"),
        }
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result.map_err(Into::into)
}

fn print_config_location() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("ext_sort config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a config path"),
    }
}

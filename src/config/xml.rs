//! XML configuration support.
//! - Reads optional settings from config.xml (quick_xml + serde).
//! - A missing file is not an error, and the file is never created or rewritten.
//! - Unknown fields are rejected to surface typos early.
//!
//! Example:
//! <config>
//!   <log_level>info</log_level>
//!   <log_file>/var/log/ext_sort.log</log_file>
//!   <workers>8</workers>
//!   <copy_mode>staged</copy_mode>
//! </config>

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{Config, CopyMode, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    workers: Option<usize>,
    copy_mode: Option<String>,
}

// Tolerate whitespace around numbers ("<workers> 4 </workers>").
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("workers: {e}"))),
    }
}

/// Settings read from a config file. Every field is optional; unset ones keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub workers: Option<usize>,
    pub copy_mode: Option<CopyMode>,
}

impl FileSettings {
    /// Copy every set field onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if let Some(n) = self.workers {
            cfg.workers = n;
        }
        if let Some(mode) = self.copy_mode {
            cfg.copy_mode = mode;
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse settings from XML text.
pub fn parse_settings(contents: &str) -> Result<FileSettings> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;

    let log_level = match non_empty(parsed.log_level) {
        Some(s) => Some(s.parse::<LogLevel>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let copy_mode = match non_empty(parsed.copy_mode) {
        Some(s) => Some(s.parse::<CopyMode>().map_err(|e| anyhow!(e))?),
        None => None,
    };

    Ok(FileSettings {
        log_level,
        log_file: non_empty(parsed.log_file).map(PathBuf::from),
        workers: parsed.workers,
        copy_mode,
    })
}

/// Load settings from `path`. Ok(None) if the file does not exist.
pub fn load_settings(path: &Path) -> Result<Option<FileSettings>> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let settings = parse_settings(&contents)
        .with_context(|| format!("config file '{}'", path.display()))?;
    debug!(path = %path.display(), ?settings, "Loaded config file");
    Ok(Some(settings))
}

//! Configuration: types, config file location, and XML loading.
//! Precedence is defaults < config file < CLI flags; the CLI layer applies the last step.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, CopyMode, LogLevel};
pub use xml::{FileSettings, load_settings};

/// Reserved bucket for files without an extension.
pub const NO_EXTENSION_BUCKET: &str = "no_extension";

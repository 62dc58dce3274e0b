//! Command implementations and shared config loading.

pub mod config;
pub mod diagnose;
pub mod serve;

use radiograph_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Expand `~` in a `--config` argument.
pub fn config_path(arg: Option<&Path>) -> Option<PathBuf> {
    arg.map(|path| PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()))
}

/// Load config from an explicit path, or the default location.
///
/// An explicit path must exist; the default location may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

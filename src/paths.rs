//! XDG-style path resolution for the configuration directory.
//!
//! `XDG_CONFIG_HOME` is honored on every platform so the layout is the same
//! on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "quicklingo";

/// Returns the configuration directory for quicklingo.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/quicklingo` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/quicklingo` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

//! Configuration file loading

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Standard locations searched for the defaults file, in order
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "buildvar.toml",
    ".buildvar.toml",
    "android/buildvar.toml",
];

/// Find the first existing configuration file among `candidates`,
/// relative to `root`
pub fn find_config_file(root: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Load and parse a TOML configuration file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path)
        } else {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
                .with_source(e)
        }
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("Parsing config file {}", path.display()))
    })
}

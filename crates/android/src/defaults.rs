//! Resolution defaults
//!
//! The partial configuration resolution starts from, usually read from a
//! `buildvar.toml` file:
//!
//! ```toml
//! application_id = "com.example.once_upon_a_line"
//! min_sdk = 21
//! target_sdk = 34
//! compile_sdk = 34
//! version_code = 1
//! version_name = "1.0.0"
//!
//! [debug_signing]
//! store_file = "keys/debug.keystore"
//! store_password = "android"
//! key_alias = "androiddebugkey"
//! key_password = "android"
//! ```

use crate::build_config::BuildConfig;
use crate::signing::SigningCredentials;
use crate::variant::BuildVariant;
use buildvar_core::config::{find_config_file, load_toml, DEFAULT_CANDIDATES};
use buildvar_core::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Seed values for resolution; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildDefaults {
    /// Application identifier
    pub application_id: Option<String>,
    /// Code namespace
    pub namespace: Option<String>,
    /// Minimum SDK level
    pub min_sdk: Option<u32>,
    /// Target SDK level
    pub target_sdk: Option<u32>,
    /// Compile SDK level
    pub compile_sdk: Option<u32>,
    /// Version code
    pub version_code: Option<u32>,
    /// Version name
    pub version_name: Option<String>,
    /// NDK version
    pub ndk_version: Option<String>,
    /// Java compatibility level
    pub jvm_target: Option<String>,
    /// Replacement for the stock debug keystore
    pub debug_signing: Option<SigningCredentials>,
}

impl BuildDefaults {
    /// Load defaults from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let defaults: Self = load_toml(path)?;
        tracing::debug!(path = %path.display(), "Loaded build defaults");
        Ok(defaults)
    }

    /// Look for a defaults file in the standard locations under `root`
    pub fn discover(root: &Path) -> Result<Option<(PathBuf, Self)>> {
        match find_config_file(root, DEFAULT_CANDIDATES) {
            Some(path) => {
                let defaults = Self::load(&path)?;
                Ok(Some((path, defaults)))
            }
            None => Ok(None),
        }
    }
}

impl From<&BuildConfig> for BuildDefaults {
    fn from(config: &BuildConfig) -> Self {
        Self {
            application_id: Some(config.application_id().to_string()),
            namespace: Some(config.namespace().to_string()),
            min_sdk: Some(config.min_sdk()),
            target_sdk: Some(config.target_sdk()),
            compile_sdk: Some(config.compile_sdk()),
            version_code: Some(config.version_code()),
            version_name: Some(config.version_name().to_string()),
            ndk_version: config.ndk_version().map(String::from),
            jvm_target: Some(config.jvm_target().to_string()),
            debug_signing: Some(config.signing(BuildVariant::Debug).clone()),
        }
    }
}

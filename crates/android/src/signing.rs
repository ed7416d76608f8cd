//! Signing credentials
//!
//! A keystore reference plus the secrets needed to use it. Release
//! credentials come from `key.properties`; debug credentials default to the
//! well-known Android debug keystore.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `key.properties` key for the keystore path
pub const STORE_FILE: &str = "storeFile";
/// `key.properties` key for the keystore password
pub const STORE_PASSWORD: &str = "storePassword";
/// `key.properties` key for the key alias
pub const KEY_ALIAS: &str = "keyAlias";
/// `key.properties` key for the key password
pub const KEY_PASSWORD: &str = "keyPassword";

/// All signing keys, in canonical order
pub const SIGNING_KEYS: [&str; 4] = [STORE_FILE, STORE_PASSWORD, KEY_ALIAS, KEY_PASSWORD];

const DEBUG_STORE_FILE: &str = "~/.android/debug.keystore";
const DEBUG_STORE_PASSWORD: &str = "android";
const DEBUG_KEY_ALIAS: &str = "androiddebugkey";
const DEBUG_KEY_PASSWORD: &str = "android";

const REDACTED: &str = "********";

/// Keystore reference and secrets for one build variant
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SigningCredentials {
    /// Path to the keystore file
    #[serde(default)]
    pub store_file: Option<String>,
    /// Keystore password
    #[serde(default)]
    pub store_password: Option<String>,
    /// Alias of the signing key inside the keystore
    #[serde(default)]
    pub key_alias: Option<String>,
    /// Password of the signing key
    #[serde(default)]
    pub key_password: Option<String>,
}

impl SigningCredentials {
    /// The non-secret debug keystore every Android SDK install generates
    pub fn debug_default() -> Self {
        Self {
            store_file: Some(DEBUG_STORE_FILE.to_string()),
            store_password: Some(DEBUG_STORE_PASSWORD.to_string()),
            key_alias: Some(DEBUG_KEY_ALIAS.to_string()),
            key_password: Some(DEBUG_KEY_PASSWORD.to_string()),
        }
    }

    /// Value for one of the [`SIGNING_KEYS`]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            STORE_FILE => self.store_file.as_deref(),
            STORE_PASSWORD => self.store_password.as_deref(),
            KEY_ALIAS => self.key_alias.as_deref(),
            KEY_PASSWORD => self.key_password.as_deref(),
            _ => None,
        }
    }

    /// Signing keys with no (or a blank) value
    pub fn missing_keys(&self) -> Vec<&'static str> {
        SIGNING_KEYS
            .into_iter()
            .filter(|key| self.get(key).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// All four fields present
    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    /// None of the four fields present
    pub fn is_empty(&self) -> bool {
        self.missing_keys().len() == SIGNING_KEYS.len()
    }

    pub(crate) fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            STORE_FILE => &mut self.store_file,
            STORE_PASSWORD => &mut self.store_password,
            KEY_ALIAS => &mut self.key_alias,
            KEY_PASSWORD => &mut self.key_password,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("store_file", &self.store_file)
            .field("store_password", &self.store_password.as_ref().map(|_| REDACTED))
            .field("key_alias", &self.key_alias)
            .field("key_password", &self.key_password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Mask a secret for human-readable output
pub fn redact(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => REDACTED,
        _ => "(unset)",
    }
}

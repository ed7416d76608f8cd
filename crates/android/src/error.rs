//! Resolution errors

use buildvar_core::error::{Error as CoreError, ErrorCode};
use thiserror::Error;

/// Result type alias for resolution
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a build configuration could not be resolved
///
/// The set is closed. Errors are deterministic for a given input, so none
/// of them is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field has no usable value after merging
    #[error("Missing or invalid value for required field '{0}'")]
    MissingRequiredField(String),

    /// Some, but not all, release signing keys were supplied
    #[error("Incomplete signing credentials: missing {}", .missing.join(", "))]
    IncompleteSigningCredentials { missing: Vec<String> },

    /// An identifier is not a reverse-domain name
    #[error("Invalid {field} '{value}': expected a reverse-domain name such as com.example.app")]
    InvalidIdentifier { field: String, value: String },

    /// `minSdk <= targetSdk <= compileSdk` does not hold
    #[error(
        "SDK versions out of order: minSdk={min_sdk}, targetSdk={target_sdk}, compileSdk={compile_sdk}"
    )]
    SdkVersionOrder {
        min_sdk: u32,
        target_sdk: u32,
        compile_sdk: u32,
    },
}

impl ConfigError {
    /// Matching core error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::MissingRequiredField(_) => ErrorCode::MissingRequiredField,
            ConfigError::IncompleteSigningCredentials { .. } => {
                ErrorCode::IncompleteSigningCredentials
            }
            ConfigError::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            ConfigError::SdkVersionOrder { .. } => ErrorCode::SdkVersionOrder,
        }
    }

    /// How to fix it
    pub fn suggestion(&self) -> String {
        match self {
            ConfigError::MissingRequiredField(name) => format!(
                "Set '{}' in a property source or the defaults file",
                name
            ),
            ConfigError::IncompleteSigningCredentials { .. } => {
                "Provide all of storeFile, storePassword, keyAlias and keyPassword, or remove them to sign release builds with the debug keystore".to_string()
            }
            ConfigError::InvalidIdentifier { .. } => {
                "Use dot-separated segments that start with a letter and contain only letters, digits or '_'".to_string()
            }
            ConfigError::SdkVersionOrder { .. } => {
                "Ensure minSdk <= targetSdk <= compileSdk".to_string()
            }
        }
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::new(err.code(), err.to_string())
            .with_suggestion(err.suggestion())
            .with_source(err)
    }
}

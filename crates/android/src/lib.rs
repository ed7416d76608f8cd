//! Android build-variant configuration for buildvar
//!
//! This crate decides which values flow into the Android toolchain:
//! - Build variants and their signing credentials
//! - Resolution defaults, loadable from `buildvar.toml`
//! - The layered configuration resolver and its closed error set
//!
//! Loading property files is left to the caller; see
//! [`buildvar_core::properties::PropertySource::load`].

#![warn(missing_docs)]

pub mod build_config;
pub mod defaults;
pub mod error;
pub mod resolver;
pub mod signing;
pub mod variant;

pub use build_config::BuildConfig;
pub use defaults::BuildDefaults;
pub use error::ConfigError;
pub use resolver::{resolve, ConfigResolver};
pub use variant::BuildVariant;

//! Core utilities for the buildvar tools
//!
//! This crate provides the shared plumbing the resolver and CLI build on:
//!
//! - **Error handling**: structured errors with codes, context, recovery
//!   suggestions and distinct exit codes
//! - **Property sources**: the `key=value` format of `key.properties` and
//!   `local.properties`, loaded as optional layers
//! - **Configuration**: TOML defaults-file discovery and loading
//!
//! # Example
//!
//! ```rust,no_run
//! use buildvar_core::properties::PropertySource;
//!
//! // Absent files load as `None`, never as an error
//! let signing = PropertySource::load("android/key.properties")?;
//! if let Some(source) = &signing {
//!     println!("{} entries from {}", source.len(), source.origin());
//! }
//! # Ok::<(), buildvar_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod properties;

pub use error::{Error, ErrorCode, Result, ResultExt};

//! Configuration file discovery and loading
//!
//! Shared helpers for TOML configuration files used by the tools.

mod loader;

pub use loader::{find_config_file, load_toml, DEFAULT_CANDIDATES};

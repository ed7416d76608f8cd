//! CLI utilities for the buildvar tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Aligned key/value output
//! - Small formatting helpers

#![warn(missing_docs)]

pub mod output;

//! Harness configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry limits, redaction rules)
//! - The immutable [`Config`] value shared by the whole client
//! - Log level/format types used by the logger and the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};

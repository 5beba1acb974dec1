//! Startup initialization.
//!
//! This module provides functions to initialize process-wide resources:
//! the logger and the pooled HTTP client. Both are constructed once at
//! startup; failures here are configuration errors and fatal.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;

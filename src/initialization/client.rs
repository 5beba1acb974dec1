//! HTTP client initialization.
//!
//! This module builds the pooled `reqwest::Client` that backs the transport
//! session. One client is created per session and reused for every attempt,
//! so connections are kept alive across calls.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Idle pooled connections are kept around this long before being closed.
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Initializes the HTTP client with the configured defaults.
///
/// Creates a `reqwest::Client` configured with:
/// - Default per-request timeout from the configuration
/// - Connection pooling with a fixed idle timeout
/// - Redirect following enabled (reqwest default, up to 10 hops)
///
/// # Arguments
///
/// * `config` - Harness configuration containing the timeout settings
///
/// # Returns
///
/// A configured HTTP client ready for making requests.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
        .build()
}

//! api_harness library: resilient HTTP client layer for REST API testing
//!
//! This library issues HTTP requests against an unreliable remote service,
//! retries transient failures with bounded exponential backoff, reuses
//! pooled connections across calls, sanitizes and records every attempt,
//! and hands callers a uniform, inspectable [`ApiResponse`] envelope.
//!
//! # Example
//!
//! ```no_run
//! use api_harness::{ApiHarness, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let harness = ApiHarness::new(&Config::default())?;
//!
//! let page = harness.users.list(Some(2), Some(10)).await?;
//! println!("status {} after {} attempt(s)", page.status, page.attempts);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod clients;
pub mod config;
mod error_handling;
mod executor;
pub mod initialization;
pub mod models;
mod redact;
mod retry;
mod testdata;
mod transport;

// Re-export public API
pub use clients::{AuthClient, ResourcesClient, UsersClient};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, NetworkErrorKind, ValidationError};
pub use executor::{ApiResponse, Executor, RequestDescriptor};
pub use redact::RedactionRules;
pub use retry::{RetryDecision, RetryPolicy};
pub use testdata::TestDataGenerator;
pub use transport::{RawOutcome, Session};

use std::sync::Arc;

/// The full client surface: one executor shared by every endpoint client.
///
/// Constructing the harness validates the configuration (base URL, client
/// build) up front, so configuration errors surface at startup, before any
/// test executes.
#[derive(Debug, Clone)]
pub struct ApiHarness {
    /// Users endpoint client.
    pub users: UsersClient,
    /// Resources endpoint client.
    pub resources: ResourcesClient,
    /// Authentication endpoint client.
    pub auth: AuthClient,
}

impl ApiHarness {
    /// Builds the harness from the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] for a malformed base URL or a
    /// client that cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let executor = Arc::new(Executor::from_config(config)?);
        Ok(Self::from_executor(executor))
    }

    /// Builds the harness around an existing shared executor.
    pub fn from_executor(executor: Arc<Executor>) -> Self {
        Self {
            users: UsersClient::new(Arc::clone(&executor)),
            resources: ResourcesClient::new(Arc::clone(&executor)),
            auth: AuthClient::new(executor),
        }
    }
}

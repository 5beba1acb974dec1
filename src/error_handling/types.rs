//! Error type definitions.
//!
//! This module defines the error taxonomy of the harness: fatal
//! configuration errors, local validation errors, and the network-error
//! kinds the transport session reports.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for startup failures.
///
/// These are the only failures that surface as hard errors before any
/// request is made: a malformed base URL or a client/logger that cannot be
/// constructed is fatal, not retryable.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The configured base URL does not parse.
    #[error("Invalid base URL {url:?}: {source}")]
    BaseUrlError {
        /// The offending URL string.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// Error building the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A caller supplied invalid arguments to a typed endpoint client.
///
/// Surfaced synchronously, before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending argument.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Kinds of network-level failure the transport session can report.
///
/// These are distinct, pattern-matchable outcomes rather than opaque faults;
/// the retry policy keys its transient/terminal decision off this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DisplayMacro, EnumIterMacro)]
pub enum NetworkErrorKind {
    /// The request did not complete within the per-call timeout.
    Timeout,
    /// The peer reset an established connection mid-exchange.
    ConnectionReset,
    /// The peer actively refused the connection.
    ConnectionRefused,
    /// Name resolution failed.
    Dns,
    /// The connection could not be established for any other reason.
    Connect,
    /// TLS negotiation or certificate verification failed.
    Tls,
    /// The request URL could not be constructed.
    InvalidUrl,
    /// The request body could not be sent.
    Body,
    /// The response body could not be read or decoded.
    Decode,
    /// Any other transport-level failure.
    Other,
}

impl NetworkErrorKind {
    /// Whether this kind is classified as transient (worth retrying).
    ///
    /// Only timeouts and connection resets qualify; everything else (TLS
    /// failures, malformed URLs, decode errors) will fail the same way on
    /// the next attempt.
    pub fn is_transient(self) -> bool {
        matches!(self, NetworkErrorKind::Timeout | NetworkErrorKind::ConnectionReset)
    }
}

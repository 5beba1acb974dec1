//! Configuration constants.
//!
//! This module defines the default operational parameters used when no
//! explicit configuration is supplied: timeouts, retry limits, backoff
//! bounds, and the redaction rule set.

/// Default base URL of the API under test.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of attempts per logical call (initial + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default initial backoff delay in milliseconds.
///
/// The wait before attempt `n + 1` is `base * 2^(n - 1)`, so with the
/// default of 1000ms the waits are 1s, 2s, 4s, ...
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Default cap on the computed backoff delay in milliseconds.
///
/// Exponential backoff grows without bound; this cap keeps a long retry
/// sequence from sleeping for minutes between attempts.
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 30_000;

/// Default jitter factor (disabled).
///
/// Jitter spreads simultaneous retries from parallel callers. It is off by
/// default so retry timing stays deterministic under test; see
/// `RetryPolicy::with_jitter`.
pub const DEFAULT_JITTER_FACTOR: f64 = 0.0;

/// Field-name patterns whose values are masked before logging.
///
/// Matching is case-insensitive and by substring, so `api_token`,
/// `Authorization`, and `USER_PASSWORD` all match.
pub const REDACTED_FIELD_PATTERNS: [&str; 5] =
    ["password", "token", "api_key", "secret", "authorization"];

/// Replacement marker written in place of redacted values.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Marker inserted when sanitization truncates an over-deep structure.
pub const ELISION_MARKER: &str = "[ELIDED: max depth exceeded]";

/// Maximum nesting depth the sanitizer will walk before eliding.
pub const MAX_SANITIZE_DEPTH: usize = 32;

/// Name of the client-identifier header attached to every request.
pub const CLIENT_HEADER_NAME: &str = "x-api-harness";

/// Value of the client-identifier header.
pub const CLIENT_HEADER_VALUE: &str =
    concat!("api_harness/", env!("CARGO_PKG_VERSION"));

/// Largest `per_page` value the list endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

//! Retry policy.
//!
//! A pure decision layer mapping (outcome, attempt number) to a
//! [`RetryDecision`]. The policy never performs I/O and never sleeps; the
//! executor owns the actual waiting, so the policy stays trivially testable.
//!
//! Classification:
//! - **Transient** (retried): HTTP 429, any 5xx, and network errors of kind
//!   timeout or connection-reset.
//! - **Terminal** (never retried): 2xx/3xx, any other 4xx, and any other
//!   network error kind.

use std::time::Duration;

use rand::Rng;

use crate::config::Config;
use crate::transport::RawOutcome;

/// One retry decision, produced fresh per attempt and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryDecision {
    /// Whether another attempt should be made.
    pub should_retry: bool,
    /// How long to wait before the next attempt (zero when giving up).
    pub wait: Duration,
    /// The attempt number the next attempt would carry.
    pub next_attempt: u32,
}

impl RetryDecision {
    fn give_up(attempt: u32) -> Self {
        Self {
            should_retry: false,
            wait: Duration::ZERO,
            next_attempt: attempt,
        }
    }
}

/// Bounded exponential backoff with optional server-directed waits.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter_factor: f64,
}

impl RetryPolicy {
    /// Creates a policy with explicit bounds and jitter disabled.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
            jitter_factor: 0.0,
        }
    }

    /// Creates a policy from the immutable configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
            jitter_factor: config.jitter_factor,
        }
    }

    /// Enables uniform jitter of up to `factor * delay` on top of each wait.
    ///
    /// Jitter desynchronizes retries from parallel callers. It is off by
    /// default so retry timing stays deterministic under test; a factor of
    /// `0.0` disables it again.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.max(0.0);
        self
    }

    /// The configured attempt limit (initial attempt included).
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether an outcome is classified as transient.
    pub fn is_transient(outcome: &RawOutcome) -> bool {
        match outcome {
            RawOutcome::Response { status, .. } => {
                *status == 429 || (500..=599).contains(status)
            }
            RawOutcome::NetworkError { kind, .. } => kind.is_transient(),
        }
    }

    /// Computes the capped exponential backoff for a given attempt number.
    ///
    /// The wait after attempt `n` is `base * 2^(n - 1)`, saturating rather
    /// than overflowing, and never exceeds the configured cap. Jitter is not
    /// applied here; see [`RetryPolicy::decide`].
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let base_ms = self.base_delay.as_millis() as u64;
        let exponential = 2u64.saturating_pow(attempt - 1);
        let delay_ms = base_ms.saturating_mul(exponential);
        Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as u64))
    }

    /// Decides whether `outcome` on attempt `attempt` should be retried.
    ///
    /// For transient outcomes below the attempt limit the wait is the capped
    /// exponential backoff, unless the response carried a parseable
    /// `Retry-After` header with a positive value, which takes precedence.
    /// A `Retry-After` of 0 or an unparseable value falls back to the
    /// computed backoff. Terminal outcomes and exhausted budgets give up.
    pub fn decide(&self, outcome: &RawOutcome, attempt: u32) -> RetryDecision {
        if !Self::is_transient(outcome) || attempt >= self.max_attempts {
            return RetryDecision::give_up(attempt);
        }

        let wait = outcome
            .header("retry-after")
            .and_then(parse_retry_after)
            .unwrap_or_else(|| self.backoff(attempt));

        RetryDecision {
            should_retry: true,
            wait: self.apply_jitter(wait),
            next_attempt: attempt + 1,
        }
    }

    /// Adds uniform jitter in `[0, factor * wait)` when enabled.
    fn apply_jitter(&self, wait: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return wait;
        }
        let range_ms = (wait.as_millis() as f64 * self.jitter_factor) as u64;
        if range_ms == 0 {
            return wait;
        }
        let jitter = rand::rng().random_range(0..range_ms);
        wait + Duration::from_millis(jitter)
    }
}

/// Parses a `Retry-After` header value as positive integer seconds.
///
/// HTTP-date forms are not honored; the remote under test only ever sends
/// delta-seconds. Zero and unparseable values yield `None` so the caller
/// falls back to computed backoff.
fn parse_retry_after(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Some(Duration::from_secs(seconds)),
        _ => None,
    }
}

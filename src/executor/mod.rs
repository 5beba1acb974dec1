//! Resilient request execution.
//!
//! The [`Executor`] orchestrates one logical call: it replays the request
//! descriptor against the transport session, classifies each outcome,
//! consults the retry policy, waits out the decided backoff, and finally
//! produces one [`ApiResponse`] envelope. The per-call flow is
//!
//! `Building -> Attempting -> {Succeeded, Retrying, Exhausted, FailedTerminal}`
//!
//! where `Retrying` loops back to `Attempting` after the decided wait and
//! the three terminal states all return an envelope. Per-attempt failures
//! are absorbed here; nothing below a configuration error escapes as a hard
//! failure.

mod descriptor;
mod envelope;

use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::redact::RedactionRules;
use crate::retry::RetryPolicy;
use crate::transport::{RawOutcome, Session};

pub use descriptor::RequestDescriptor;
pub use envelope::ApiResponse;

/// Drives the attempt/retry loop for logical calls.
///
/// One executor is shared by all typed endpoint clients via `Arc`; it holds
/// the pooled session, the retry policy, and the redaction rule set, all
/// immutable after construction, so concurrent calls need no external
/// locking. Within one call, attempts are strictly sequential and never
/// overlap.
#[derive(Debug)]
pub struct Executor {
    session: Session,
    policy: RetryPolicy,
    rules: Arc<RedactionRules>,
}

impl Executor {
    /// Creates an executor from explicitly constructed parts.
    pub fn new(session: Session, policy: RetryPolicy, rules: Arc<RedactionRules>) -> Self {
        Self {
            session,
            policy,
            rules,
        }
    }

    /// Creates an executor (session, policy, default redaction rules) from
    /// the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] when the base URL is malformed or
    /// the HTTP client cannot be built. This is the only hard failure on
    /// the request path; everything later is reported inside envelopes.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self {
            session: Session::new(config)?,
            policy: RetryPolicy::from_config(config),
            rules: Arc::new(RedactionRules::default()),
        })
    }

    /// The redaction rule set this executor logs through.
    pub fn rules(&self) -> &RedactionRules {
        &self.rules
    }

    /// Executes one logical call to completion.
    ///
    /// Loops attempts until the first non-transient outcome or until the
    /// retry policy exhausts its budget, sleeping out each decided wait.
    /// Every attempt is sanitized and logged synchronously before the
    /// envelope is returned, so the diagnostic log always carries exactly
    /// `attempts` records for the call. The returned envelope reports the
    /// total attempt count but only the final attempt's elapsed time.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> ApiResponse {
        let mut attempt: u32 = 1;

        loop {
            let outcome = self.session.send(&descriptor).await;
            self.log_attempt(&descriptor, &outcome, attempt);

            let decision = self.policy.decide(&outcome, attempt);
            if !decision.should_retry {
                if RetryPolicy::is_transient(&outcome) {
                    warn!(
                        "{} {} exhausted after {attempt} attempt(s)",
                        descriptor.method, descriptor.path
                    );
                }
                return ApiResponse::from_outcome(outcome, attempt);
            }

            debug!(
                "{} {} attempt {attempt} transient, retrying in {:?}",
                descriptor.method, descriptor.path, decision.wait
            );
            tokio::time::sleep(decision.wait).await;
            attempt = decision.next_attempt;
        }
    }

    /// Writes one structured, sanitized log record for an attempt.
    ///
    /// Sanitization happens before anything reaches the sink; the record
    /// carries method, path, redacted headers and body, status or error
    /// kind, and the attempt's own elapsed time.
    fn log_attempt(&self, descriptor: &RequestDescriptor, outcome: &RawOutcome, attempt: u32) {
        let request_headers = self.rules.sanitize_headers(&descriptor.headers);
        let request_body = descriptor
            .json_body
            .as_ref()
            .map(|body| self.rules.sanitize(body))
            .unwrap_or(Value::Null);

        let record = match outcome {
            RawOutcome::Response {
                status,
                headers,
                body,
                latency,
            } => {
                let response_body = self.rules.sanitize(&envelope::parse_body(body));
                json!({
                    "method": descriptor.method.as_str(),
                    "path": descriptor.path,
                    "attempt": attempt,
                    "request_headers": sanitized_pairs(&request_headers),
                    "request_body": request_body,
                    "status": status,
                    "response_headers": sanitized_pairs(&self.rules.sanitize_headers(headers)),
                    "response_body": response_body,
                    "elapsed_ms": latency.as_millis() as u64,
                })
            }
            RawOutcome::NetworkError {
                kind,
                message,
                latency,
            } => json!({
                "method": descriptor.method.as_str(),
                "path": descriptor.path,
                "attempt": attempt,
                "request_headers": sanitized_pairs(&request_headers),
                "request_body": request_body,
                "error": kind.to_string(),
                "message": message,
                "elapsed_ms": latency.as_millis() as u64,
            }),
        };

        info!("{record}");
    }
}

/// Renders header pairs as a JSON object for the log record.
fn sanitized_pairs(headers: &[(String, String)]) -> Value {
    Value::Object(
        headers
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect(),
    )
}

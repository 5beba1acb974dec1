//! The response envelope.

use std::time::Duration;

use serde_json::{json, Value};

use crate::transport::RawOutcome;

/// The uniform, immutable result of one logical call.
///
/// An envelope is produced exactly once per call, after a successful attempt
/// or after the retry policy gives up; callers never observe an intermediate
/// retry state. HTTP-level failures (4xx/5xx) and network failures after
/// exhaustion are reported as `success = false` envelopes, never as errors,
/// so tests can assert on failure responses uniformly.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the final attempt (0 for pure network failures).
    pub status: u16,
    /// Parsed JSON body. Unparseable bodies are wrapped as a JSON string;
    /// network failures embed `{"error": <kind>, "message": ...}`.
    pub body: Value,
    /// Response headers of the final attempt, in arrival order.
    pub headers: Vec<(String, String)>,
    /// Wall-clock duration of the final (deciding) attempt only.
    pub elapsed: Duration,
    /// Total number of attempts made for this logical call.
    pub attempts: u32,
    /// Whether the final status is in the 2xx range.
    pub success: bool,
}

impl ApiResponse {
    /// Builds the envelope from the final attempt's outcome.
    pub(crate) fn from_outcome(outcome: RawOutcome, attempts: u32) -> Self {
        match outcome {
            RawOutcome::Response {
                status,
                headers,
                body,
                latency,
            } => Self {
                status,
                body: parse_body(&body),
                headers,
                elapsed: latency,
                attempts,
                success: (200..300).contains(&status),
            },
            RawOutcome::NetworkError {
                kind,
                message,
                latency,
            } => Self {
                status: 0,
                body: json!({
                    "error": kind.to_string(),
                    "message": message,
                }),
                headers: Vec::new(),
                elapsed: latency,
                attempts,
                success: false,
            },
        }
    }

    /// Whether the status is in the 4xx range.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Whether the status is in the 5xx range.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Looks up a response header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parses a response body as JSON, falling back to the raw text.
///
/// An empty body becomes `null` (204 No Content responses carry none).
/// Shared with the attempt logger so the diagnostic record and the envelope
/// always report the same body.
pub(crate) fn parse_body(body: &str) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

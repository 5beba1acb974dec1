//! Raw transport outcomes.

use std::time::Duration;

use crate::error_handling::NetworkErrorKind;

/// The raw result of one network exchange, before any retry decision.
///
/// Every attempt produces exactly one `RawOutcome`; the transport session
/// never raises for HTTP-level or network-level failures, so the executor
/// can pattern-match on the outcome uniformly.
#[derive(Debug)]
pub enum RawOutcome {
    /// The server answered with an HTTP response (any status code).
    Response {
        /// HTTP status code.
        status: u16,
        /// Response headers in arrival order.
        headers: Vec<(String, String)>,
        /// Raw response body text.
        body: String,
        /// Wall-clock duration of this attempt.
        latency: Duration,
    },
    /// The exchange failed below the HTTP layer.
    NetworkError {
        /// What went wrong, as a pattern-matchable kind.
        kind: NetworkErrorKind,
        /// Human-readable detail from the underlying error.
        message: String,
        /// Wall-clock duration until the failure was observed.
        latency: Duration,
    },
}

impl RawOutcome {
    /// The status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RawOutcome::Response { status, .. } => Some(*status),
            RawOutcome::NetworkError { .. } => None,
        }
    }

    /// Duration of the attempt that produced this outcome.
    pub fn latency(&self) -> Duration {
        match self {
            RawOutcome::Response { latency, .. } => *latency,
            RawOutcome::NetworkError { latency, .. } => *latency,
        }
    }

    /// Looks up a response header by name, case-insensitively.
    ///
    /// Returns `None` for network errors and missing headers.
    pub fn header(&self, name: &str) -> Option<&str> {
        match self {
            RawOutcome::Response { headers, .. } => headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            RawOutcome::NetworkError { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_headers(headers: Vec<(String, String)>) -> RawOutcome {
        RawOutcome::Response {
            status: 200,
            headers,
            body: String::new(),
            latency: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let outcome =
            response_with_headers(vec![("Retry-After".to_string(), "2".to_string())]);
        assert_eq!(outcome.header("retry-after"), Some("2"));
        assert_eq!(outcome.header("RETRY-AFTER"), Some("2"));
        assert_eq!(outcome.header("x-missing"), None);
    }

    #[test]
    fn test_network_error_has_no_status_or_headers() {
        let outcome = RawOutcome::NetworkError {
            kind: crate::error_handling::NetworkErrorKind::Timeout,
            message: "deadline elapsed".to_string(),
            latency: Duration::from_secs(1),
        };
        assert_eq!(outcome.status(), None);
        assert_eq!(outcome.header("retry-after"), None);
    }
}

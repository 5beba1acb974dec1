//! Request descriptors.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

/// A transient description of one logical request.
///
/// Built by a typed endpoint client, consumed by the executor, and discarded
/// after the call completes. The descriptor never carries retry state; the
/// same descriptor is replayed verbatim on every attempt.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the session base URL.
    pub path: String,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// Extra request headers; a name collision replaces the session default.
    pub headers: Vec<(String, String)>,
    /// Optional JSON request body.
    pub json_body: Option<Value>,
    /// Per-call timeout override; the session default applies when `None`.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Creates a descriptor for `method` against `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            json_body: None,
            timeout: None,
        }
    }

    /// Appends one query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Appends one request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    /// Overrides the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

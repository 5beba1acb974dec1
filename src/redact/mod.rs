//! Payload sanitization for diagnostics.
//!
//! Every request and response the executor logs passes through here first,
//! so secrets never reach the log sink. Sanitization walks the payload's
//! key/value structure and replaces the value of any key matching the rule
//! set, recursing into nested objects and arrays.

use serde_json::{Map, Value};

use crate::config::{
    ELISION_MARKER, MAX_SANITIZE_DEPTH, REDACTED_FIELD_PATTERNS, REDACTION_MARKER,
};

/// The process-wide redaction rule set.
///
/// Loaded once at startup and shared read-only by every sanitization call;
/// there is no per-call mutation, so no locking is needed.
#[derive(Debug, Clone)]
pub struct RedactionRules {
    patterns: Vec<String>,
    marker: String,
}

impl Default for RedactionRules {
    fn default() -> Self {
        Self {
            patterns: REDACTED_FIELD_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            marker: REDACTION_MARKER.to_string(),
        }
    }
}

impl RedactionRules {
    /// Creates a rule set from explicit patterns and a replacement marker.
    ///
    /// Patterns are matched case-insensitively as substrings of field names.
    pub fn new(patterns: Vec<String>, marker: impl Into<String>) -> Self {
        Self {
            patterns: patterns.into_iter().map(|p| p.to_lowercase()).collect(),
            marker: marker.into(),
        }
    }

    /// The replacement marker written in place of sensitive values.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether a field name matches any redaction pattern.
    fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.patterns.iter().any(|pattern| key.contains(pattern))
    }

    /// Produces a sanitized copy of `payload`.
    ///
    /// Values of matching keys are replaced by the marker regardless of
    /// their type; non-matching keys are left untouched. Arrays are walked
    /// element by element. The input is never mutated, and sanitization
    /// never fails: structures nested deeper than the recursion cap are
    /// replaced by an elision marker instead.
    ///
    /// Sanitizing already-sanitized output is a fixed point, so a payload
    /// can safely pass through this function more than once.
    pub fn sanitize(&self, payload: &Value) -> Value {
        self.sanitize_at_depth(payload, 0)
    }

    fn sanitize_at_depth(&self, payload: &Value, depth: usize) -> Value {
        if depth >= MAX_SANITIZE_DEPTH {
            return Value::String(ELISION_MARKER.to_string());
        }
        match payload {
            Value::Object(fields) => {
                let mut sanitized = Map::with_capacity(fields.len());
                for (key, value) in fields {
                    if self.matches(key) {
                        sanitized.insert(key.clone(), Value::String(self.marker.clone()));
                    } else {
                        sanitized.insert(key.clone(), self.sanitize_at_depth(value, depth + 1));
                    }
                }
                Value::Object(sanitized)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.sanitize_at_depth(item, depth + 1))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Sanitizes a list of header pairs.
    ///
    /// Header names are matched against the same rule set as body fields,
    /// so `Authorization: Bearer ...` is masked before logging.
    pub fn sanitize_headers(&self, headers: &[(String, String)]) -> Vec<(String, String)> {
        headers
            .iter()
            .map(|(name, value)| {
                if self.matches(name) {
                    (name.clone(), self.marker.clone())
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }
}

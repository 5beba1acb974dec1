//! Pooled HTTP session bound to one base endpoint.

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::{Config, CLIENT_HEADER_NAME, CLIENT_HEADER_VALUE};
use crate::error_handling::{categorize_network_error, InitializationError};
use crate::executor::RequestDescriptor;
use crate::initialization::init_client;
use crate::transport::RawOutcome;

/// A reusable connection channel to a fixed base endpoint.
///
/// The session owns one pooled `reqwest::Client` for the process lifetime;
/// connections are checked out and reused by the pool itself, and the
/// session is safe to share across calling tasks without external locking.
///
/// The session performs the literal exchange only. It attaches the default
/// JSON headers, the client-identifier header, and the bearer token when
/// configured, but makes no retry decision and writes no log record; both
/// belong to the executor.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    default_timeout: Duration,
}

impl Session {
    /// Creates a session from the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError::BaseUrlError`] when the configured
    /// base URL does not parse, and [`InitializationError::HttpClientError`]
    /// when the pooled client cannot be built. Both are fatal and surface
    /// before any request is made.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let trimmed = config.base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| InitializationError::BaseUrlError {
            url: config.base_url.clone(),
            source,
        })?;

        let client = init_client(config)?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            auth_token: config.auth_token.clone(),
            default_timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Builds the full request URL from the base and an endpoint path.
    ///
    /// Trailing slashes on the base and leading slashes on the path are
    /// normalized so `users`, `/users`, and `//users` all join the same way.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Performs one network exchange for the given descriptor.
    ///
    /// Always returns a [`RawOutcome`]; HTTP-level failure statuses and
    /// network-level errors are both reported as values, never as panics or
    /// opaque faults. The per-call timeout is the descriptor override or the
    /// configured default.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> RawOutcome {
        let url = self.build_url(&descriptor.path);
        let timeout = descriptor.timeout.unwrap_or(self.default_timeout);

        let mut builder = self
            .client
            .request(descriptor.method.clone(), &url)
            .timeout(timeout)
            .headers(self.request_headers(descriptor));

        if !descriptor.query.is_empty() {
            builder = builder.query(&descriptor.query);
        }
        if let Some(body) = &descriptor.json_body {
            builder = builder.json(body);
        }

        debug!("{} {}", descriptor.method, url);

        let start = Instant::now();
        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let headers = response
                    .headers()
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.to_string(),
                            value.to_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect();
                match response.text().await {
                    Ok(body) => RawOutcome::Response {
                        status,
                        headers,
                        body,
                        latency: start.elapsed(),
                    },
                    Err(e) => RawOutcome::NetworkError {
                        kind: categorize_network_error(&e),
                        message: e.to_string(),
                        latency: start.elapsed(),
                    },
                }
            }
            Err(e) => RawOutcome::NetworkError {
                kind: categorize_network_error(&e),
                message: e.to_string(),
                latency: start.elapsed(),
            },
        }
    }

    /// Assembles the header map for one request.
    ///
    /// Starts from the session defaults (JSON content negotiation, client
    /// identifier, bearer token when configured); descriptor headers are
    /// inserted last and replace a default of the same name, so a per-call
    /// `Authorization` header wins over the configured token. Malformed
    /// header names or values are skipped with a warning rather than failing
    /// the exchange.
    fn request_headers(&self, descriptor: &RequestDescriptor) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(CLIENT_HEADER_NAME),
            HeaderValue::from_static(CLIENT_HEADER_VALUE),
        );

        if let Some(token) = &self.auth_token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Skipping configured bearer token with invalid characters"),
            }
        }

        for (name, value) in &descriptor.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping malformed request header {name:?}"),
            }
        }

        headers
    }
}

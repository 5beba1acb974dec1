//! Configuration types.
//!
//! This module defines the immutable configuration value constructed once at
//! process start and passed by reference into the transport session and the
//! retry policy. There is no ambient global lookup: everything the client
//! needs to know travels inside [`Config`].

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_JITTER_FACTOR, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY_MS,
    DEFAULT_RETRY_MAX_DELAY_MS, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the harness.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: human-readable format with colors (default)
/// - `Json`: one structured JSON object per record for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Harness configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically, from the environment via
/// [`Config::from_env`], or by the CLI binary.
///
/// # Examples
///
/// ```no_run
/// use api_harness::Config;
///
/// let config = Config {
///     base_url: "https://reqres.in/api".to_string(),
///     max_attempts: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API under test
    pub base_url: String,

    /// Bearer token attached to every request when set
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum attempts per logical call, counting the initial attempt
    pub max_attempts: u32,

    /// Initial backoff delay in milliseconds
    pub retry_base_delay_ms: u64,

    /// Cap on the computed backoff delay in milliseconds
    pub retry_max_delay_ms: u64,

    /// Uniform jitter factor added to backoff waits (0.0 disables jitter)
    pub jitter_factor: f64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            jitter_factor: DEFAULT_JITTER_FACTOR,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// Recognized variables: `API_BASE_URL`, `API_TOKEN`, `API_TIMEOUT`
    /// (seconds), `API_MAX_ATTEMPTS`, `API_RETRY_BASE_DELAY_MS`,
    /// `API_RETRY_MAX_DELAY_MS`, `API_JITTER_FACTOR`. Values that fail to
    /// parse are ignored in favor of the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("API_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(token) = std::env::var("API_TOKEN") {
            if !token.trim().is_empty() {
                config.auth_token = Some(token);
            }
        }
        if let Some(timeout) = parse_env_var::<u64>("API_TIMEOUT") {
            config.timeout_seconds = timeout;
        }
        if let Some(attempts) = parse_env_var::<u32>("API_MAX_ATTEMPTS") {
            config.max_attempts = attempts;
        }
        if let Some(base_delay) = parse_env_var::<u64>("API_RETRY_BASE_DELAY_MS") {
            config.retry_base_delay_ms = base_delay;
        }
        if let Some(max_delay) = parse_env_var::<u64>("API_RETRY_MAX_DELAY_MS") {
            config.retry_max_delay_ms = max_delay;
        }
        if let Some(jitter) = parse_env_var::<f64>("API_JITTER_FACTOR") {
            config.jitter_factor = jitter;
        }

        config
    }
}

fn parse_env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring unparseable {name}={raw:?}");
                None
            }
        },
        Err(_) => None,
    }
}

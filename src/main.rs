//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `api_harness` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - A smoke sequence against the configured API with a printed summary
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use api_harness::initialization::init_logger_with;
use api_harness::{ApiHarness, ApiResponse, Config, LogFormat, LogLevel, TestDataGenerator};

/// Command-line options; anything unset falls back to the environment and
/// then to the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "api_harness", version, about = "Smoke-check a REST API through the resilient client")]
struct Opt {
    /// Base URL of the API under test
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token attached to every request
    #[arg(long)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum attempts per call (initial attempt included)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

impl Opt {
    fn into_config(self) -> Config {
        let mut config = Config::from_env();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(token) = self.token {
            config.auth_token = Some(token);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        config.log_level = self.log_level;
        config.log_format = self.log_format;
        config
    }
}

fn tally(label: &str, response: &ApiResponse, passed: &mut usize, failed: &mut usize) {
    if response.success {
        *passed += 1;
        println!(
            "  ok   {label}: {} in {:.0?} ({} attempt{})",
            response.status,
            response.elapsed,
            response.attempts,
            if response.attempts == 1 { "" } else { "s" }
        );
    } else {
        *failed += 1;
        println!(
            "  FAIL {label}: status {} after {} attempt(s)",
            response.status, response.attempts
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();
    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let config = opt.into_config();
    let harness = match ApiHarness::new(&config) {
        Ok(harness) => harness,
        Err(e) => {
            eprintln!("api_harness error: {e:#}");
            process::exit(2);
        }
    };

    println!("Smoke-checking {} ...", config.base_url);

    let mut generator = TestDataGenerator::default();
    let mut passed = 0usize;
    let mut failed = 0usize;

    let response = harness.users.list(Some(1), Some(5)).await?;
    tally("list users", &response, &mut passed, &mut failed);

    let response = harness.users.get(2).await?;
    tally("get user", &response, &mut passed, &mut failed);

    let user = generator.user();
    let response = harness
        .users
        .create(
            user["name"].as_str().unwrap_or("Ada Lovelace"),
            user["job"].as_str().unwrap_or("engineer"),
        )
        .await?;
    tally("create user", &response, &mut passed, &mut failed);

    let response = harness.resources.list(Some(1), None).await?;
    tally("list resources", &response, &mut passed, &mut failed);

    let creds = generator.credentials();
    let response = harness
        .auth
        .login(
            creds["email"].as_str().unwrap_or("eve.holt@reqres.in"),
            creds["password"].as_str().unwrap_or("cityslicka"),
        )
        .await?;
    tally("login", &response, &mut passed, &mut failed);

    println!("{passed} passed, {failed} failed");
    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

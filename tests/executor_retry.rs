//! Integration tests for the attempt/retry loop.
//!
//! These tests run the executor against a local mock server and verify:
//! - Transient outcomes (5xx, 429, timeouts) are retried up to the budget
//! - Terminal outcomes produce exactly one attempt
//! - `Retry-After` takes precedence over computed backoff
//! - The envelope reports status, attempts, and body uniformly

use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use api_harness::{ApiHarness, Config, Executor, RequestDescriptor};

/// Logger that keeps every emitted message so tests can assert on the
/// diagnostic records themselves, not just mock-server hit counts.
struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl log::Log for RecordingLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target().starts_with("api_harness")
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.messages
                .lock()
                .expect("logger lock")
                .push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static RECORDER: RecordingLogger = RecordingLogger {
    messages: Mutex::new(Vec::new()),
};

/// Installs the recording logger once per test binary.
fn install_recorder() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        log::set_logger(&RECORDER).expect("no other logger installed");
        log::set_max_level(log::LevelFilter::Info);
    });
}

/// The structured attempt records captured for one request path.
///
/// Tests run concurrently in this binary, so records are keyed by a path
/// unique to the calling test.
fn attempt_records(request_path: &str) -> Vec<Value> {
    RECORDER
        .messages
        .lock()
        .expect("logger lock")
        .iter()
        .filter_map(|message| serde_json::from_str::<Value>(message).ok())
        .filter(|record| record["path"] == json!(request_path))
        .collect()
}

/// Config pointed at the mock server with fast backoff for test speed.
fn test_config(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        timeout_seconds: 5,
        max_attempts: 3,
        retry_base_delay_ms: 100,
        retry_max_delay_ms: 2_000,
        ..Default::default()
    }
}

async fn attempts_received(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

/// Scenario: two 503s, then a 200 with `{"id":7}`. The third attempt wins.
#[tokio::test]
async fn test_transient_failures_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .mount(&server)
        .await;

    let harness = ApiHarness::new(&test_config(&server)).expect("harness");
    let response = harness.users.get(7).await.expect("valid arguments");

    assert!(response.success);
    assert_eq!(response.status, 200);
    assert_eq!(response.attempts, 3);
    assert_eq!(response.body, json!({"id": 7}));
    assert_eq!(attempts_received(&server).await, 3);
}

/// Scenario: a 404 is terminal: one attempt, no retry, uniform envelope.
#[tokio::test]
async fn test_terminal_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/23"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let harness = ApiHarness::new(&test_config(&server)).expect("harness");
    let response = harness.users.get(23).await.expect("valid arguments");

    assert!(!response.success);
    assert_eq!(response.status, 404);
    assert_eq!(response.attempts, 1);
    assert_eq!(attempts_received(&server).await, 1);
}

/// Scenario: persistent 429 with `Retry-After: 2`. The server-directed wait
/// overrides the (much smaller) computed backoff before attempts 2 and 3,
/// and the exhausted envelope still reports uniformly.
#[tokio::test]
async fn test_retry_after_header_overrides_backoff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "2")
                .set_body_json(json!({"error": "rate limited"})),
        )
        .mount(&server)
        .await;

    let harness = ApiHarness::new(&test_config(&server)).expect("harness");
    let start = Instant::now();
    let response = harness.users.list(None, None).await.expect("valid arguments");
    let elapsed = start.elapsed();

    assert!(!response.success);
    assert_eq!(response.status, 429);
    assert_eq!(response.attempts, 3);
    // Two waits of >= 2s each, far above the 100/200ms computed backoff
    assert!(
        elapsed >= Duration::from_secs(4),
        "expected >= 4s of server-directed waiting, got {elapsed:?}"
    );
    assert_eq!(attempts_received(&server).await, 3);
}

/// Exhaustion on persistent 503: waits follow the exponential lower bound
/// (100ms then 200ms before jitter) and the final envelope carries the last
/// observed status.
#[tokio::test]
async fn test_exhaustion_respects_backoff_lower_bound() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unknown"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "down"})))
        .mount(&server)
        .await;

    let harness = ApiHarness::new(&test_config(&server)).expect("harness");
    let start = Instant::now();
    let response = harness.resources.list(None, None).await.expect("valid arguments");
    let elapsed = start.elapsed();

    assert!(!response.success);
    assert_eq!(response.status, 503);
    assert_eq!(response.attempts, 3);
    assert_eq!(response.body, json!({"error": "down"}));
    assert!(
        elapsed >= Duration::from_millis(300),
        "expected >= 300ms of backoff, got {elapsed:?}"
    );
}

/// A request that times out is transient: it is retried to exhaustion and
/// reported as a `success=false` envelope with the error kind in the body,
/// never as a hard failure.
#[tokio::test]
async fn test_timeout_is_retried_then_reported_in_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        timeout_seconds: 1,
        max_attempts: 2,
        retry_base_delay_ms: 50,
        ..test_config(&server)
    };
    let harness = ApiHarness::new(&config).expect("harness");
    let response = harness.users.get(1).await.expect("valid arguments");

    assert!(!response.success);
    assert_eq!(response.status, 0);
    assert_eq!(response.attempts, 2);
    assert_eq!(response.body["error"], json!("Timeout"));
    assert_eq!(attempts_received(&server).await, 2);
}

/// A refused connection is terminal (not a timeout/reset): one attempt.
#[tokio::test]
async fn test_connection_refused_is_terminal() {
    // Grab a local port, then release it so the port refuses connections.
    // (A dropped `MockServer` goes back to wiremock's server pool and keeps
    // listening, so bind a plain listener instead.)
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let dead_uri = format!("http://127.0.0.1:{port}");

    let config = Config {
        base_url: dead_uri,
        timeout_seconds: 2,
        max_attempts: 3,
        retry_base_delay_ms: 50,
        retry_max_delay_ms: 500,
        ..Default::default()
    };
    let harness = ApiHarness::new(&config).expect("harness");
    let response = harness.users.get(1).await.expect("valid arguments");

    assert!(!response.success);
    assert_eq!(response.status, 0);
    assert_eq!(response.attempts, 1);
    assert_eq!(response.body["error"], json!("ConnectionRefused"));
}

/// The executor is safe to share across tasks: concurrent calls through one
/// `Arc<Executor>` all complete with independent envelopes.
#[tokio::test]
async fn test_concurrent_calls_share_one_executor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .mount(&server)
        .await;

    let executor = Arc::new(Executor::from_config(&test_config(&server)).expect("executor"));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executor = Arc::clone(&executor);
        handles.push(tokio::spawn(async move {
            let descriptor = RequestDescriptor::new(reqwest::Method::GET, "users/9");
            executor.execute(descriptor).await
        }));
    }

    for handle in handles {
        let response = handle.await.expect("task should not panic");
        assert!(response.success);
        assert_eq!(response.attempts, 1);
        assert_eq!(response.body["id"], json!(9));
    }
    assert_eq!(attempts_received(&server).await, 8);
}

/// Every attempt writes exactly one structured log record, carrying its own
/// attempt number, so a three-attempt call leaves three records.
#[tokio::test]
async fn test_each_attempt_writes_one_log_record() {
    install_recorder();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/880301"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/880301"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 880301})))
        .mount(&server)
        .await;

    let executor = Executor::from_config(&test_config(&server)).expect("executor");
    let descriptor = RequestDescriptor::new(reqwest::Method::GET, "users/880301");
    let response = executor.execute(descriptor).await;

    assert!(response.success);
    assert_eq!(response.attempts, 3);

    let records = attempt_records("users/880301");
    assert_eq!(records.len(), 3, "one log record per attempt");
    let attempts: Vec<u64> = records
        .iter()
        .map(|record| record["attempt"].as_u64().expect("attempt field"))
        .collect();
    assert_eq!(attempts, vec![1, 2, 3]);
    assert_eq!(records[0]["status"], json!(503));
    assert_eq!(records[2]["status"], json!(200));
}

/// A response body that is not JSON still reaches the diagnostic record
/// verbatim, matching what the envelope reports.
#[tokio::test]
async fn test_unparseable_response_body_is_logged_verbatim() {
    install_recorder();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/990401"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let config = Config {
        max_attempts: 1,
        ..test_config(&server)
    };
    let executor = Executor::from_config(&config).expect("executor");
    let descriptor = RequestDescriptor::new(reqwest::Method::GET, "users/990401");
    let response = executor.execute(descriptor).await;

    assert_eq!(response.status, 502);
    assert_eq!(response.body, json!("<html>bad gateway</html>"));

    let records = attempt_records("users/990401");
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0]["response_body"],
        json!("<html>bad gateway</html>"),
        "the raw body must survive into the log record"
    );
}

/// The envelope's elapsed time covers the final attempt only, not the
/// accumulated waits of earlier attempts.
#[tokio::test]
async fn test_elapsed_reflects_final_attempt_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(503).set_delay(Duration::from_millis(400)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .mount(&server)
        .await;

    let harness = ApiHarness::new(&test_config(&server)).expect("harness");
    let response = harness.users.get(3).await.expect("valid arguments");

    assert!(response.success);
    assert_eq!(response.attempts, 2);
    // Final attempt is fast; the slow first attempt and the backoff wait
    // must not be counted
    assert!(
        response.elapsed < Duration::from_millis(300),
        "final-attempt elapsed should be small, got {:?}",
        response.elapsed
    );
}

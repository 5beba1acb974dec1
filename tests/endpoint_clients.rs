//! Integration tests for the typed endpoint clients.
//!
//! Each client is a thin façade: these tests verify the paths, query
//! parameters, bodies, and default headers it produces, plus the fail-fast
//! validation that prevents a network call on invalid input.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use api_harness::models::{self, SingleUserResponse, TokenResponse, UsersListResponse};
use api_harness::{ApiHarness, Config};

fn harness_for(server: &MockServer) -> ApiHarness {
    let config = Config {
        base_url: server.uri(),
        timeout_seconds: 5,
        max_attempts: 2,
        retry_base_delay_ms: 50,
        ..Default::default()
    };
    ApiHarness::new(&config).expect("harness")
}

fn sample_users_page() -> serde_json::Value {
    json!({
        "page": 2,
        "per_page": 2,
        "total": 12,
        "total_pages": 6,
        "data": [
            {
                "id": 3,
                "email": "emma.wong@reqres.in",
                "first_name": "Emma",
                "last_name": "Wong",
                "avatar": "https://reqres.in/img/faces/3-image.jpg"
            },
            {
                "id": 4,
                "email": "eve.holt@reqres.in",
                "first_name": "Eve",
                "last_name": "Holt",
                "avatar": "https://reqres.in/img/faces/4-image.jpg"
            }
        ],
        "support": {"url": "https://reqres.in/#support", "text": "support"}
    })
}

#[tokio::test]
async fn test_list_users_sends_pagination_and_parses_schema() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_users_page()))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness_for(&server);
    let response = harness.users.list(Some(2), Some(2)).await.expect("valid");

    assert!(response.success);
    let page: UsersListResponse = models::parse(&response.body).expect("schema match");
    assert_eq!(page.page, 2);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].first_name, "Eve");
}

#[tokio::test]
async fn test_requests_carry_json_and_client_identifier_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/2"))
        .and(header("accept", "application/json"))
        .and(header_exists("x-api-harness"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 2,
                "email": "janet.weaver@reqres.in",
                "first_name": "Janet",
                "last_name": "Weaver",
                "avatar": "https://reqres.in/img/faces/2-image.jpg"
            },
            "support": {"url": "https://reqres.in/#support", "text": "support"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness_for(&server);
    let response = harness.users.get(2).await.expect("valid");

    assert!(response.success);
    let user: SingleUserResponse = models::parse(&response.body).expect("schema match");
    assert_eq!(user.data.id, 2);
}

#[tokio::test]
async fn test_bearer_token_is_attached_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_users_page()))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        base_url: server.uri(),
        auth_token: Some("sekrit".to_string()),
        ..Default::default()
    };
    let harness = ApiHarness::new(&config).expect("harness");
    let response = harness.users.list(None, None).await.expect("valid");
    assert!(response.success);
}

#[tokio::test]
async fn test_create_user_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "Ada Lovelace", "job": "engineer"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "Ada Lovelace",
            "job": "engineer",
            "id": "712",
            "createdAt": "2026-08-29T10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness_for(&server);
    let response = harness
        .users
        .create("Ada Lovelace", "engineer")
        .await
        .expect("valid");

    assert!(response.success);
    assert_eq!(response.status, 201);
    assert_eq!(response.body["id"], json!("712"));
}

#[tokio::test]
async fn test_delete_user_returns_no_content_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness_for(&server);
    let response = harness.users.delete(2).await.expect("valid");

    assert!(response.success);
    assert_eq!(response.status, 204);
    assert_eq!(response.body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_login_returns_token_and_failure_is_an_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "eve.holt@reqres.in",
            "password": "cityslicka"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "QpwL5tke4Pnpja7X4"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Missing password"})),
        )
        .mount(&server)
        .await;

    let harness = harness_for(&server);

    let login = harness
        .auth
        .login("eve.holt@reqres.in", "cityslicka")
        .await
        .expect("valid");
    assert!(login.success);
    let token: TokenResponse = models::parse(&login.body).expect("schema match");
    assert_eq!(token.token, "QpwL5tke4Pnpja7X4");

    // Negative path: the remote's 400 arrives as a success=false envelope,
    // not an error
    let incomplete = harness.auth.register_incomplete(Some("sydney@fife")).await;
    assert!(!incomplete.success);
    assert_eq!(incomplete.status, 400);
    assert_eq!(incomplete.body["error"], json!("Missing password"));
    assert_eq!(incomplete.attempts, 1);
}

#[tokio::test]
async fn test_logout_token_replaces_configured_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        base_url: server.uri(),
        auth_token: Some("configured".to_string()),
        ..Default::default()
    };
    let harness = ApiHarness::new(&config).expect("harness");
    let response = harness.auth.logout(Some("per-call")).await;
    assert!(response.success);

    let requests = server.received_requests().await.expect("recording enabled");
    let auth: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
    assert_eq!(auth.len(), 1, "exactly one Authorization header");
    assert_eq!(auth[0], "Bearer per-call");
}

#[tokio::test]
async fn test_resources_live_under_unknown_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unknown/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 2,
                "name": "fuchsia rose",
                "year": 2001,
                "color": "#C74375",
                "pantone_value": "17-2031"
            },
            "support": {"url": "https://reqres.in/#support", "text": "support"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness_for(&server);
    let response = harness.resources.get(2).await.expect("valid");

    assert!(response.success);
    let resource: api_harness::models::SingleResourceResponse =
        models::parse(&response.body).expect("schema match");
    assert_eq!(resource.data.color, "#C74375");
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_network() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and show up in the request log

    let harness = harness_for(&server);
    assert!(harness.users.list(Some(0), None).await.is_err());
    assert!(harness.users.get(0).await.is_err());
    assert!(harness.users.create("", "job").await.is_err());
    assert!(harness.auth.register("bad-email", "pw").await.is_err());
    assert!(harness
        .resources
        .create("name", 1800, "#AE0E36", "x")
        .await
        .is_err());

    let received = server.received_requests().await.unwrap_or_default();
    assert!(
        received.is_empty(),
        "validation failures must not dispatch requests"
    );
}
